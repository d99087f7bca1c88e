// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! Query matching and candidate ranking.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! ## CHANNEL_PRECEDENCE
//! The scoring constants MUST satisfy, per channel:
//!
//! ```text
//! exact > prefix > substring
//! ```
//!
//! and across channels:
//!
//! ```text
//! NUMBER_EXACT > NAME_EXACT
//! ```
//!
//! A literal route number is the most specific search intent the viewer
//! supports, so an exact number hit must outrank an exact name hit. The
//! numeric values themselves (100/90/80/70/60/50) are an implementation
//! detail; only the ordering is a contract.
//!
//! # Two-channel design
//!
//! A bare numeric query like "12" must match by route number and beat any
//! coincidental "12" buried inside a name, while a textual query must never
//! accidentally read a number. Each entry is therefore scored independently
//! in a numeric channel (active only for numeric queries, against the
//! normalized route number) and a name channel (always active, against the
//! normalized name), and the two are combined with `max`.

use crate::index::{IndexEntry, RouteIndex};
use crate::normalize::normalize;

/// Default cap on the candidate list.
pub const DEFAULT_LIMIT: usize = 8;

/// Score for a query that equals the route number.
pub const SCORE_NUMBER_EXACT: u32 = 100;
/// Score for a query that equals the route name.
pub const SCORE_NAME_EXACT: u32 = 90;
/// Score for a query that prefixes the route number.
pub const SCORE_NUMBER_PREFIX: u32 = 80;
/// Score for a query that prefixes the route name.
pub const SCORE_NAME_PREFIX: u32 = 70;
/// Score for a query found inside the route number.
pub const SCORE_NUMBER_SUBSTRING: u32 = 60;
/// Score for a query found inside the route name.
pub const SCORE_NAME_SUBSTRING: u32 = 50;

/// An index entry paired with its relevance for one query.
///
/// Ephemeral: recomputed on every keystroke, never stored.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub entry: &'a IndexEntry,
    pub score: u32,
}

/// Rank the index against a raw query.
///
/// Returns at most `limit` candidates ordered by descending score, ties
/// broken by ascending label length (terser labels are more specific).
/// An empty or whitespace-only query returns no candidates.
pub fn match_routes<'a>(query: &str, index: &'a RouteIndex, limit: usize) -> Vec<Candidate<'a>> {
    let q = normalize(query);
    if q.is_empty() {
        return Vec::new();
    }
    let q_num = numeric_query(&q);

    let mut scored: Vec<Candidate<'a>> = index
        .entries()
        .iter()
        .filter_map(|entry| {
            let numeric = q_num.and_then(|qn| score_channel(&entry.normalized_number, qn, true));
            let name = score_channel(&entry.normalized_name, &q, false);
            match (numeric, name) {
                (None, None) => None,
                (a, b) => Some(Candidate {
                    entry,
                    score: a.unwrap_or(0).max(b.unwrap_or(0)),
                }),
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry.label.chars().count().cmp(&b.entry.label.chars().count()))
    });
    scored.truncate(limit);
    scored
}

/// Rank with the default candidate cap.
pub fn match_routes_default<'a>(query: &str, index: &'a RouteIndex) -> Vec<Candidate<'a>> {
    match_routes(query, index, DEFAULT_LIMIT)
}

/// Derive the numeric form of a normalized query, if it has one.
///
/// Strips one leading "ruta" word and one leading '#', so "ruta 45", "#45"
/// and "45" all search the number channel for "45". Returns `None` unless
/// the remainder parses as a number.
fn numeric_query(q: &str) -> Option<&str> {
    let stripped = q.strip_prefix("ruta").unwrap_or(q).trim_start();
    let stripped = stripped.strip_prefix('#').unwrap_or(stripped).trim();
    if !stripped.is_empty() && stripped.parse::<f64>().is_ok() {
        Some(stripped)
    } else {
        None
    }
}

/// Score one channel: exact beats prefix beats substring; empty tokens
/// never match. `numeric` selects the constant tier.
fn score_channel(token: &str, q: &str, numeric: bool) -> Option<u32> {
    if token.is_empty() || q.is_empty() {
        return None;
    }
    if token == q {
        Some(if numeric { SCORE_NUMBER_EXACT } else { SCORE_NAME_EXACT })
    } else if token.starts_with(q) {
        Some(if numeric { SCORE_NUMBER_PREFIX } else { SCORE_NAME_PREFIX })
    } else if token.contains(q) {
        Some(if numeric { SCORE_NUMBER_SUBSTRING } else { SCORE_NAME_SUBSTRING })
    } else {
        None
    }
}
