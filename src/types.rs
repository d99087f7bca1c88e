// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the route search engine.
//!
//! These types define how routes, their geometry, and the map-facing
//! selection effects fit together.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Route**: `id` is non-empty. `number` and `name` may both be absent
//!   when the upstream feed is malformed; the index still keeps such routes
//!   searchable under a placeholder label.
//!
//! - **BoundingRegion**: `min.lng <= max.lng ∧ min.lat <= max.lat`.
//!   Construction only through `from_paths`/`extend`, which maintain it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display accent used when a route carries no color of its own.
pub const FALLBACK_COLOR: &str = "#3392ff";

// =============================================================================
// NEWTYPES
// =============================================================================

/// Opaque, stable route identifier.
///
/// Ids are compared as strings even when the feed emits integers, so they
/// survive an upstream switch to UUIDs without touching the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        RouteId(id.to_string())
    }
}

/// A longitude/latitude pair, in that order (GeoJSON convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        LngLat { lng, lat }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Minimal rectangle enclosing a route's geometry.
///
/// Used only to frame the viewport and to anchor the selection label; the
/// engine never inspects geometry beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub min: LngLat,
    pub max: LngLat,
}

impl BoundingRegion {
    /// Compute the bounding region of a set of coordinate paths.
    ///
    /// Returns `None` when the paths contain no coordinates at all, which
    /// is how unsupported geometry reaches the selection logic: as "no
    /// region", never as an error.
    pub fn from_paths(paths: &[Vec<LngLat>]) -> Option<Self> {
        let mut region: Option<BoundingRegion> = None;
        for point in paths.iter().flatten() {
            region = Some(match region {
                None => BoundingRegion {
                    min: *point,
                    max: *point,
                },
                Some(r) => r.extend(*point),
            });
        }
        region
    }

    /// Grow the region to include `point`.
    pub fn extend(self, point: LngLat) -> Self {
        BoundingRegion {
            min: LngLat::new(self.min.lng.min(point.lng), self.min.lat.min(point.lat)),
            max: LngLat::new(self.max.lng.max(point.lng), self.max.lat.max(point.lat)),
        }
    }

    /// Center point of the region, used to anchor the label.
    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.min.lng + self.max.lng) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }
}

// =============================================================================
// ROUTE
// =============================================================================

/// A single bus route, immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Opaque stable identifier. Non-empty.
    pub id: RouteId,
    /// Short route code, e.g. "12". Missing in malformed feed rows.
    pub number: Option<String>,
    /// Display name, e.g. "Centro - Plaza Norte".
    pub name: Option<String>,
    /// Display accent; `FALLBACK_COLOR` when the feed omits it.
    pub color: String,
    /// Coordinate paths. Only used to compute the bounding region.
    pub geometry: Vec<Vec<LngLat>>,
}

impl Route {
    /// Bounding region of the route's geometry, if it has one.
    pub fn bounding_region(&self) -> Option<BoundingRegion> {
        BoundingRegion::from_paths(&self.geometry)
    }
}

// =============================================================================
// MAP-FACING EFFECT TYPES
// =============================================================================

/// Criterion the map uses to decide which rendered route is emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightFilter {
    /// Match nothing; the highlight layer draws no features.
    None,
    /// Match exactly the feature with this id.
    Route(RouteId),
}

/// Content of the single transient route label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    /// Bold first line, e.g. "Ruta #12".
    pub heading: String,
    /// Second line: route name, or a placeholder when the feed has none.
    pub body: String,
}

/// How the viewport frames a bounding region on commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    /// Padding in pixels around the region.
    pub padding: f64,
    /// Zoom ceiling so short routes do not fill the screen.
    pub max_zoom: f64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        FrameOptions {
            padding: 80.0,
            max_zoom: 16.0,
        }
    }
}
