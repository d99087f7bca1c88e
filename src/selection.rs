// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! Selection and highlight lifecycle.
//!
//! At most one route is selected at any time. The selection is observable
//! through exactly two map effects, which always move together: a highlight
//! filter and a single transient label. This module owns the state machine
//! (Idle ⇄ Selected); the rendering itself lives behind [`MapSurface`].
//!
//! # Invariants
//!
//! - `selected` changes only through `select`/`deselect` (and the
//!   conveniences built on them). No other path may touch it.
//! - Re-selecting while already selected replaces highlight and label in one
//!   transition; there is no intermediate state where both or neither show.

use crate::index::RouteIndex;
use crate::types::{FrameOptions, HighlightFilter, LabelContent, LngLat, RouteId};
use std::fmt;

/// Error raised by the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested id is not in the current index. This is a programming
    /// error in the caller (a stale candidate list, a feature from another
    /// source); it must never degrade into a silent no-highlight state.
    UnknownRoute(RouteId),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::UnknownRoute(id) => {
                write!(f, "route '{}' is not in the current index", id)
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// The map rendering collaborator, owned externally.
///
/// The engine only ever drives these seven operations; layout, styling and
/// tile rendering stay on the other side of this trait.
pub trait MapSurface {
    /// Replace the highlight criterion.
    fn set_highlight_filter(&mut self, filter: HighlightFilter);
    /// Ensure the highlight draws above the base route layer.
    fn bring_highlight_to_front(&mut self);
    /// Show the transient label at `anchor`, replacing any existing label.
    fn show_label(&mut self, anchor: LngLat, content: LabelContent);
    /// Remove the label if one is shown.
    fn hide_label(&mut self);
    /// Pan/zoom to fit a region.
    fn frame_region(&mut self, region: crate::types::BoundingRegion, options: FrameOptions);
    /// Which route's rendered shape, if any, sits under `point`.
    fn route_at_point(&self, point: LngLat) -> Option<RouteId>;
    /// Current viewport center, the label anchor of last resort.
    fn view_center(&self) -> LngLat;
}

/// Owns the single source of truth for "which route is selected".
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<RouteId>,
}

impl SelectionController {
    pub fn new() -> Self {
        SelectionController::default()
    }

    /// Currently selected route id, if any.
    pub fn selected(&self) -> Option<&RouteId> {
        self.selected.as_ref()
    }

    /// Pure query: is `id` the selected route?
    pub fn is_selected(&self, id: &RouteId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Transition to Selected on `id`.
    ///
    /// The label anchors at `anchor` when given, else at the center of the
    /// route's bounding region, else at the current view center. Replaces
    /// any previous selection atomically.
    pub fn select<S: MapSurface>(
        &mut self,
        id: &RouteId,
        anchor: Option<LngLat>,
        index: &RouteIndex,
        surface: &mut S,
    ) -> Result<(), SelectionError> {
        let entry = index
            .get(id)
            .ok_or_else(|| SelectionError::UnknownRoute(id.clone()))?;

        surface.set_highlight_filter(HighlightFilter::Route(id.clone()));
        surface.bring_highlight_to_front();

        let anchor = anchor
            .or_else(|| entry.bounding_region.map(|r| r.center()))
            .unwrap_or_else(|| surface.view_center());
        surface.show_label(anchor, label_content(entry.route.number.as_deref(), entry.route.name.as_deref()));

        tracing::debug!(route = %id, "route selected");
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Transition to Idle. Idempotent.
    pub fn deselect<S: MapSurface>(&mut self, surface: &mut S) {
        if self.selected.is_none() {
            return;
        }
        surface.set_highlight_filter(HighlightFilter::None);
        surface.hide_label();
        tracing::debug!("selection cleared");
        self.selected = None;
    }

    /// Deselect when `id` is already selected, else select it.
    ///
    /// This is what a direct click on a rendered route invokes.
    pub fn toggle<S: MapSurface>(
        &mut self,
        id: &RouteId,
        anchor: Option<LngLat>,
        index: &RouteIndex,
        surface: &mut S,
    ) -> Result<(), SelectionError> {
        if self.is_selected(id) {
            self.deselect(surface);
            Ok(())
        } else {
            self.select(id, anchor, index, surface)
        }
    }

    /// Frame the route's bounding region, then select it.
    ///
    /// Framing happens first so the label anchor is computed against the
    /// final view; routes without a region skip the framing and still get
    /// selected.
    pub fn frame_and_select<S: MapSurface>(
        &mut self,
        id: &RouteId,
        index: &RouteIndex,
        surface: &mut S,
    ) -> Result<(), SelectionError> {
        let region = index
            .get(id)
            .ok_or_else(|| SelectionError::UnknownRoute(id.clone()))?
            .bounding_region;
        if let Some(region) = region {
            surface.frame_region(region, FrameOptions::default());
        }
        self.select(id, None, index, surface)
    }

    /// Route a raw map click: a hit on a route shape toggles it with the
    /// click point as label anchor; a click on empty map clears the
    /// selection.
    pub fn handle_map_click<S: MapSurface>(
        &mut self,
        point: LngLat,
        index: &RouteIndex,
        surface: &mut S,
    ) -> Result<(), SelectionError> {
        match surface.route_at_point(point) {
            Some(id) => self.toggle(&id, Some(point), index, surface),
            None => {
                self.deselect(surface);
                Ok(())
            }
        }
    }
}

/// Label shown next to a selected route.
fn label_content(number: Option<&str>, name: Option<&str>) -> LabelContent {
    LabelContent {
        heading: match number {
            Some(number) => format!("Ruta #{}", number),
            None => "Ruta".to_string(),
        },
        body: name.unwrap_or("Sin nombre").to_string(),
    }
}
