//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::index::RouteIndex;
use crate::selection::MapSurface;
use crate::types::{
    BoundingRegion, FrameOptions, HighlightFilter, LabelContent, LngLat, Route, RouteId,
    FALLBACK_COLOR,
};

/// Create a test route with a short two-point geometry.
///
/// This is the canonical implementation used across all tests.
pub fn make_route(id: &str, number: Option<&str>, name: Option<&str>) -> Route {
    Route {
        id: RouteId::from(id),
        number: number.map(str::to_string),
        name: name.map(str::to_string),
        color: FALLBACK_COLOR.to_string(),
        geometry: vec![vec![
            LngLat::new(-89.65, 20.95),
            LngLat::new(-89.60, 21.00),
        ]],
    }
}

/// Two-route index used by most scenarios:
/// route "1" is number 12 "Centro", route "2" is number 45 "Plaza Norte".
pub fn sample_index() -> RouteIndex {
    RouteIndex::build(vec![
        make_route("1", Some("12"), Some("Centro")),
        make_route("2", Some("45"), Some("Plaza Norte")),
    ])
}

/// One call into the map collaborator, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetHighlightFilter(HighlightFilter),
    BringHighlightToFront,
    ShowLabel(LngLat, LabelContent),
    HideLabel,
    FrameRegion(BoundingRegion, FrameOptions),
}

/// A `MapSurface` that records every effect so tests can assert on the
/// resulting map state and on call ordering.
#[derive(Debug)]
pub struct RecordingSurface {
    /// Every call, in order.
    pub calls: Vec<SurfaceCall>,
    /// Current highlight criterion.
    pub highlight: HighlightFilter,
    /// Current label, if shown.
    pub label: Option<(LngLat, LabelContent)>,
    /// Last framed region.
    pub framed: Option<(BoundingRegion, FrameOptions)>,
    /// What `route_at_point` answers; simulates a hit test.
    pub route_under_cursor: Option<RouteId>,
    /// What `view_center` answers.
    pub center: LngLat,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface {
            calls: Vec::new(),
            highlight: HighlightFilter::None,
            label: None,
            framed: None,
            route_under_cursor: None,
            center: LngLat::new(-89.62, 20.97),
        }
    }
}

impl MapSurface for RecordingSurface {
    fn set_highlight_filter(&mut self, filter: HighlightFilter) {
        self.highlight = filter.clone();
        self.calls.push(SurfaceCall::SetHighlightFilter(filter));
    }

    fn bring_highlight_to_front(&mut self) {
        self.calls.push(SurfaceCall::BringHighlightToFront);
    }

    fn show_label(&mut self, anchor: LngLat, content: LabelContent) {
        self.label = Some((anchor, content.clone()));
        self.calls.push(SurfaceCall::ShowLabel(anchor, content));
    }

    fn hide_label(&mut self) {
        self.label = None;
        self.calls.push(SurfaceCall::HideLabel);
    }

    fn frame_region(&mut self, region: BoundingRegion, options: FrameOptions) {
        self.framed = Some((region, options));
        self.calls.push(SurfaceCall::FrameRegion(region, options));
    }

    fn route_at_point(&self, _point: LngLat) -> Option<RouteId> {
        self.route_under_cursor.clone()
    }

    fn view_center(&self) -> LngLat {
        self.center
    }
}
