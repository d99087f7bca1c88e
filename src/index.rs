// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! Route index construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **INDEX_TOTAL**: `build` never skips a route. A route with neither
//!    number nor name is indexed under the placeholder label so malformed
//!    feed rows stay visible instead of silently disappearing.
//! 2. **INDEX_IMMUTABLE**: entries never change after `build`. A fresh feed
//!    fetch means a fresh index.
//! 3. **TOKENS_NORMALIZED**: `normalized_number`/`normalized_name` are
//!    exactly `normalize(...)` of the raw fields, so the matcher can compare
//!    them against a normalized query without re-normalizing per keystroke.

use crate::normalize::normalize;
use crate::types::{BoundingRegion, Route, RouteId};

/// Label used when a route has neither number nor name.
pub const UNNAMED_LABEL: &str = "(sin nombre)";

/// A route plus everything derived from it at build time.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub route: Route,
    /// `normalize(route.number)`, empty when the route has no number.
    pub normalized_number: String,
    /// `normalize(route.name)`, empty when the route has no name.
    pub normalized_name: String,
    /// Display string: `"{number} — {name}"`, else the name, else a placeholder.
    pub label: String,
    /// Precomputed so selection never walks geometry on the hot path.
    pub bounding_region: Option<BoundingRegion>,
}

/// Read-only search index over the fetched route collection.
///
/// Built once per fetch. `RouteIndex::default()` is the valid "no data yet"
/// state: matching against it returns nothing and selection lookups miss.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    entries: Vec<IndexEntry>,
}

impl RouteIndex {
    /// Build the index from a fetched route collection.
    ///
    /// Deterministic and total: entries come out in input order, one per
    /// route, even for routes with no searchable text.
    pub fn build(routes: Vec<Route>) -> Self {
        let entries = routes
            .into_iter()
            .map(|route| {
                let normalized_number =
                    route.number.as_deref().map(normalize).unwrap_or_default();
                let normalized_name = route.name.as_deref().map(normalize).unwrap_or_default();
                let label = display_label(route.number.as_deref(), route.name.as_deref());
                let bounding_region = route.bounding_region();
                IndexEntry {
                    route,
                    normalized_number,
                    normalized_name,
                    label,
                    bounding_region,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(entries = entries.len(), "built route index");
        RouteIndex { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Look up an entry by route id.
    pub fn get(&self, id: &RouteId) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| &e.route.id == id)
    }

    pub fn contains(&self, id: &RouteId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display label rule: number wins, then name, then the placeholder.
fn display_label(number: Option<&str>, name: Option<&str>) -> String {
    match (number, name) {
        (Some(number), name) => format!("{} — {}", number, name.unwrap_or_default()),
        (None, Some(name)) => name.to_string(),
        (None, None) => UNNAMED_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_route;

    #[test]
    fn derives_normalized_tokens() {
        let index = RouteIndex::build(vec![make_route("1", Some("12"), Some("Periférico"))]);
        let entry = &index.entries()[0];
        assert_eq!(entry.normalized_number, "12");
        assert_eq!(entry.normalized_name, "periferico");
        assert_eq!(entry.label, "12 — Periférico");
    }

    #[test]
    fn label_falls_back_to_name_then_placeholder() {
        let index = RouteIndex::build(vec![
            make_route("1", None, Some("Centro")),
            make_route("2", None, None),
        ]);
        assert_eq!(index.entries()[0].label, "Centro");
        assert_eq!(index.entries()[1].label, UNNAMED_LABEL);
    }

    #[test]
    fn malformed_routes_are_still_indexed() {
        let index = RouteIndex::build(vec![make_route("x", None, None)]);
        assert_eq!(index.len(), 1);
        assert!(index.contains(&RouteId::from("x")));
    }

    #[test]
    fn lookup_by_id() {
        let index = RouteIndex::build(vec![
            make_route("1", Some("12"), Some("Centro")),
            make_route("2", Some("45"), Some("Plaza Norte")),
        ]);
        assert!(index.get(&RouteId::from("2")).is_some());
        assert!(index.get(&RouteId::from("3")).is_none());
    }

    #[test]
    fn default_index_is_empty_and_inert() {
        let index = RouteIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains(&RouteId::from("1")));
    }
}
