// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! The autocomplete interaction state machine.
//!
//! Owns the interactive state of the search box: current query text, the
//! ranked suggestion list, the highlighted row, and whether the dropdown is
//! open. Input events (typing, arrows, Enter, Escape, hover, clicks, blur)
//! become state transitions here; committing a suggestion is delegated to
//! the [`SelectionController`].
//!
//! The host view stays thin: it forwards events, renders
//! [`AutocompleteState`], and executes the occasional [`Effect`] this module
//! hands back (such as "select all text in the input").
//!
//! # Invariants
//!
//! - `open == false` whenever `suggestions` is empty.
//! - `active_index` is a valid index into `suggestions` whenever the list is
//!   open and non-empty; never negative, never past the end.
//! - Events run to completion one at a time; nothing here suspends.
//!
//! # Deferred close
//!
//! Hiding the dropdown on blur must lose the race against a click on a
//! suggestion (the click commits, then the close arrives). Instead of a
//! timer, [`on_blur`](AutocompleteController::on_blur) arms a cancellable
//! deferred close: it returns a [`CloseToken`] the host schedules after a
//! short grace delay, and any commit, clear, or list refresh in between
//! invalidates outstanding tokens.

use crate::index::RouteIndex;
use crate::matcher::{match_routes, DEFAULT_LIMIT};
use crate::selection::{MapSurface, SelectionController, SelectionError};
use crate::types::RouteId;

/// One row of the dropdown: an owned snapshot of a matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: RouteId,
    pub label: String,
    /// Swatch color for the row.
    pub color: String,
    pub score: u32,
}

/// Observable state of the search box, rendered by the host view.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    pub query: String,
    /// Ranked, capped suggestion list for `query`.
    pub suggestions: Vec<Suggestion>,
    /// Highlighted row, `None` when the list is empty.
    pub active_index: Option<usize>,
    /// Whether the dropdown is visible.
    pub open: bool,
}

/// Keys the search input forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Escape,
}

/// Host-side reaction requested by an event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Select all text in the input, for quick re-typing after Escape.
    SelectAllText,
}

/// Process-wide keys the controller subscribes to while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    /// `/` focuses the search input.
    Slash,
    /// Escape clears the committed selection.
    Escape,
}

/// Outcome of a global key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    /// Host should move focus into the search input.
    FocusSearch,
    /// The committed selection was cleared.
    Deselected,
    /// Nothing to do (unmounted, or the key belongs to normal typing).
    Ignored,
}

/// Capability to finish a deferred dropdown close.
///
/// Only the epoch it was minted in may use it; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "schedule on_close_deadline with this token or the dropdown never closes"]
pub struct CloseToken {
    epoch: u64,
}

/// State machine driving the search box.
#[derive(Debug, Default)]
pub struct AutocompleteController {
    state: AutocompleteState,
    limit: usize,
    /// Global-key subscription lifetime; see `mount`/`unmount`.
    mounted: bool,
    /// Bumped whenever a pending deferred close becomes stale.
    close_epoch: u64,
}

impl AutocompleteController {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Controller with a custom suggestion cap.
    pub fn with_limit(limit: usize) -> Self {
        AutocompleteController {
            state: AutocompleteState::default(),
            limit,
            mounted: false,
            close_epoch: 0,
        }
    }

    /// Current observable state, for the rendering adapter.
    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    // -------------------------------------------------------------------------
    // Subscription lifecycle
    // -------------------------------------------------------------------------

    /// Install the global-key subscription. Idempotent; a second mount does
    /// not double-fire handlers because there is exactly one flag to set.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Release the global-key subscription and cancel any pending deferred
    /// close, so nothing acts on a torn-down view.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.close_epoch += 1;
    }

    /// Route a process-wide key event. Ignored while unmounted.
    pub fn on_global_key<S: MapSurface>(
        &mut self,
        key: GlobalKey,
        input_has_focus: bool,
        selection: &mut SelectionController,
        surface: &mut S,
    ) -> GlobalAction {
        if !self.mounted {
            return GlobalAction::Ignored;
        }
        match key {
            // '/' must not interfere with typing in a focused field.
            GlobalKey::Slash if !input_has_focus => GlobalAction::FocusSearch,
            GlobalKey::Slash => GlobalAction::Ignored,
            GlobalKey::Escape => {
                selection.deselect(surface);
                GlobalAction::Deselected
            }
        }
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// The input text changed.
    pub fn set_query(&mut self, query: &str, index: &RouteIndex) {
        self.state.query = query.to_string();
        self.refresh(index);
    }

    /// The input gained focus: re-run the match for the current query.
    pub fn on_focus(&mut self, index: &RouteIndex) {
        self.refresh(index);
    }

    /// A key event from the search input.
    pub fn on_key<S: MapSurface>(
        &mut self,
        key: Key,
        index: &RouteIndex,
        selection: &mut SelectionController,
        surface: &mut S,
    ) -> Result<Effect, SelectionError> {
        match key {
            Key::ArrowDown => {
                if !self.state.open {
                    self.refresh(index);
                } else if let Some(active) = self.state.active_index {
                    let last = self.state.suggestions.len().saturating_sub(1);
                    self.state.active_index = Some((active + 1).min(last));
                }
                Ok(Effect::None)
            }
            Key::ArrowUp => {
                if !self.state.open {
                    self.refresh(index);
                } else if let Some(active) = self.state.active_index {
                    self.state.active_index = Some(active.saturating_sub(1));
                }
                Ok(Effect::None)
            }
            Key::Home => {
                if self.state.open && !self.state.suggestions.is_empty() {
                    self.state.active_index = Some(0);
                }
                Ok(Effect::None)
            }
            Key::End => {
                if self.state.open && !self.state.suggestions.is_empty() {
                    self.state.active_index = Some(self.state.suggestions.len() - 1);
                }
                Ok(Effect::None)
            }
            Key::Enter => {
                if self.state.open {
                    if let Some(active) = self.state.active_index {
                        self.commit(active, index, selection, surface)?;
                    }
                } else {
                    // Fallback: commit the top-ranked match for the current
                    // query even though no dropdown is showing. Unlike a
                    // dropdown commit, the typed text stays as is.
                    let top = match_routes(&self.state.query, index, self.limit)
                        .first()
                        .map(|c| c.entry.route.id.clone());
                    if let Some(id) = top {
                        selection.frame_and_select(&id, index, surface)?;
                        self.close_list();
                    }
                }
                Ok(Effect::None)
            }
            Key::Escape => {
                self.close_list();
                selection.deselect(surface);
                Ok(Effect::SelectAllText)
            }
        }
    }

    /// The pointer hovered suggestion `row`. Moves the highlight, commits
    /// nothing.
    pub fn on_hover(&mut self, row: usize) {
        if self.state.open && row < self.state.suggestions.len() {
            self.state.active_index = Some(row);
        }
    }

    /// The pointer clicked suggestion `row`: same as Enter on that row.
    pub fn on_confirm<S: MapSurface>(
        &mut self,
        row: usize,
        index: &RouteIndex,
        selection: &mut SelectionController,
        surface: &mut S,
    ) -> Result<Effect, SelectionError> {
        if self.state.open && row < self.state.suggestions.len() {
            self.commit(row, index, selection, surface)?;
        }
        Ok(Effect::None)
    }

    /// The clear action: empty the query, close the list, drop the
    /// committed selection.
    pub fn clear<S: MapSurface>(&mut self, selection: &mut SelectionController, surface: &mut S) {
        self.state.query.clear();
        self.state.suggestions.clear();
        self.state.active_index = None;
        self.close_list();
        selection.deselect(surface);
    }

    /// The input lost focus. Arms a deferred close and returns the token
    /// the host must hand back after the grace delay.
    pub fn on_blur(&mut self) -> CloseToken {
        self.close_epoch += 1;
        CloseToken {
            epoch: self.close_epoch,
        }
    }

    /// The grace delay for `token` elapsed. Closes the dropdown unless the
    /// token went stale (a commit, clear, refresh, or unmount happened
    /// since).
    pub fn on_close_deadline(&mut self, token: CloseToken) {
        if token.epoch == self.close_epoch {
            self.close_list();
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Recompute suggestions for the current query and re-establish the
    /// state invariants: first row active, open iff non-empty.
    fn refresh(&mut self, index: &RouteIndex) {
        self.state.suggestions = match_routes(&self.state.query, index, self.limit)
            .into_iter()
            .map(|c| Suggestion {
                id: c.entry.route.id.clone(),
                label: c.entry.label.clone(),
                color: c.entry.route.color.clone(),
                score: c.score,
            })
            .collect();
        let has_rows = !self.state.suggestions.is_empty();
        self.state.active_index = if has_rows { Some(0) } else { None };
        self.state.open = has_rows;
        // A fresh list invalidates any pending deferred close.
        self.close_epoch += 1;
        tracing::trace!(
            query = %self.state.query,
            suggestions = self.state.suggestions.len(),
            "autocomplete refreshed"
        );
    }

    /// Commit suggestion `row`: frame its region, select it, echo its label
    /// into the query, close the dropdown.
    fn commit<S: MapSurface>(
        &mut self,
        row: usize,
        index: &RouteIndex,
        selection: &mut SelectionController,
        surface: &mut S,
    ) -> Result<(), SelectionError> {
        let suggestion = match self.state.suggestions.get(row) {
            Some(s) => s.clone(),
            None => return Ok(()),
        };
        selection.frame_and_select(&suggestion.id, index, surface)?;
        self.state.query = suggestion.label;
        self.close_list();
        tracing::debug!(route = %suggestion.id, "suggestion committed");
        Ok(())
    }

    fn close_list(&mut self) {
        self.state.open = false;
        // A close, however it happened, supersedes any pending deferred one.
        self.close_epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_index, RecordingSurface};
    use crate::types::HighlightFilter;

    fn setup() -> (
        AutocompleteController,
        RouteIndex,
        SelectionController,
        RecordingSurface,
    ) {
        (
            AutocompleteController::new(),
            sample_index(),
            SelectionController::new(),
            RecordingSurface::default(),
        )
    }

    #[test]
    fn typing_populates_and_opens() {
        let (mut ac, index, _, _) = setup();
        ac.set_query("12", &index);
        let state = ac.state();
        assert!(state.open);
        assert_eq!(state.suggestions.len(), 1);
        assert_eq!(state.suggestions[0].id, RouteId::from("1"));
        assert_eq!(state.active_index, Some(0));
    }

    #[test]
    fn no_matches_keeps_the_list_closed() {
        let (mut ac, index, _, _) = setup();
        ac.set_query("zzz", &index);
        assert!(!ac.state().open);
        assert!(ac.state().suggestions.is_empty());
        assert_eq!(ac.state().active_index, None);
    }

    #[test]
    fn empty_index_is_inert() {
        // "No data yet" idle state: typing against the default index does
        // nothing, and must not be an error.
        let mut ac = AutocompleteController::new();
        let index = RouteIndex::default();
        ac.set_query("12", &index);
        assert!(!ac.state().open);
    }

    #[test]
    fn arrows_stay_in_bounds() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("1", &index);
        let len = ac.state().suggestions.len();
        assert!(len >= 1);

        for _ in 0..10 {
            ac.on_key(Key::ArrowDown, &index, &mut selection, &mut surface)
                .unwrap();
        }
        assert_eq!(ac.state().active_index, Some(len - 1));

        for _ in 0..10 {
            ac.on_key(Key::ArrowUp, &index, &mut selection, &mut surface)
                .unwrap();
        }
        assert_eq!(ac.state().active_index, Some(0));
    }

    #[test]
    fn arrow_down_on_closed_list_reruns_the_match() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.state.query = "45".to_string();
        assert!(!ac.state().open);
        ac.on_key(Key::ArrowDown, &index, &mut selection, &mut surface)
            .unwrap();
        assert!(ac.state().open);
        assert_eq!(ac.state().active_index, Some(0));
    }

    #[test]
    fn home_and_end_jump() {
        let (mut ac, _, mut selection, mut surface) = setup();
        let index = RouteIndex::build(vec![
            crate::testing::make_route("a", None, Some("Linea Uno")),
            crate::testing::make_route("b", None, Some("Linea Dos")),
            crate::testing::make_route("c", None, Some("Linea Tres")),
        ]);
        ac.set_query("linea", &index);
        ac.on_key(Key::End, &index, &mut selection, &mut surface)
            .unwrap();
        assert_eq!(ac.state().active_index, Some(2));
        ac.on_key(Key::Home, &index, &mut selection, &mut surface)
            .unwrap();
        assert_eq!(ac.state().active_index, Some(0));
    }

    #[test]
    fn enter_commits_the_active_row() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("12", &index);
        ac.on_key(Key::Enter, &index, &mut selection, &mut surface)
            .unwrap();

        assert!(selection.is_selected(&RouteId::from("1")));
        assert!(!ac.state().open);
        // The chosen label is echoed into the input.
        assert_eq!(ac.state().query, "12 — Centro");
        // And the viewport was framed before the label was shown.
        assert!(surface.framed.is_some());
        assert!(surface.label.is_some());
    }

    #[test]
    fn enter_on_closed_list_commits_the_top_match() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.state.query = "plaza".to_string();
        assert!(!ac.state().open);
        ac.on_key(Key::Enter, &index, &mut selection, &mut surface)
            .unwrap();
        assert!(selection.is_selected(&RouteId::from("2")));
        // Only a dropdown commit echoes the label; the typed text survives.
        assert_eq!(ac.state().query, "plaza");
    }

    #[test]
    fn enter_on_closed_list_with_no_match_is_a_no_op() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.state.query = "zzz".to_string();
        ac.on_key(Key::Enter, &index, &mut selection, &mut surface)
            .unwrap();
        assert_eq!(selection.selected(), None);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn escape_closes_deselects_and_selects_all() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("12", &index);
        ac.on_key(Key::Enter, &index, &mut selection, &mut surface)
            .unwrap();
        assert!(selection.selected().is_some());

        ac.set_query("12", &index);
        let effect = ac
            .on_key(Key::Escape, &index, &mut selection, &mut surface)
            .unwrap();
        assert_eq!(effect, Effect::SelectAllText);
        assert!(!ac.state().open);
        assert_eq!(selection.selected(), None);
        assert_eq!(surface.highlight, HighlightFilter::None);
        assert!(surface.label.is_none());
    }

    #[test]
    fn hover_moves_highlight_without_committing() {
        let (mut ac, _, _, _) = setup();
        let index = RouteIndex::build(vec![
            crate::testing::make_route("a", None, Some("Linea Uno")),
            crate::testing::make_route("b", None, Some("Linea Dos")),
        ]);
        ac.set_query("linea", &index);
        ac.on_hover(1);
        assert_eq!(ac.state().active_index, Some(1));
        // Out-of-range hovers are ignored.
        ac.on_hover(99);
        assert_eq!(ac.state().active_index, Some(1));
    }

    #[test]
    fn click_commits_that_row() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("1", &index); // prefix of "12", so route "1" is the only row
        ac.on_confirm(0, &index, &mut selection, &mut surface)
            .unwrap();
        assert!(selection.is_selected(&RouteId::from("1")));
        assert!(!ac.state().open);
    }

    #[test]
    fn clear_resets_everything() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("12", &index);
        ac.on_key(Key::Enter, &index, &mut selection, &mut surface)
            .unwrap();

        ac.clear(&mut selection, &mut surface);
        assert_eq!(ac.state().query, "");
        assert!(!ac.state().open);
        assert!(ac.state().suggestions.is_empty());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn deferred_close_fires_when_nothing_intervenes() {
        let (mut ac, index, _, _) = setup();
        ac.set_query("12", &index);
        assert!(ac.state().open);
        let token = ac.on_blur();
        ac.on_close_deadline(token);
        assert!(!ac.state().open);
    }

    #[test]
    fn commit_wins_the_blur_race() {
        let (mut ac, index, mut selection, mut surface) = setup();
        ac.set_query("12", &index);
        let token = ac.on_blur();
        // The click lands before the grace delay elapses.
        ac.on_confirm(0, &index, &mut selection, &mut surface)
            .unwrap();
        assert!(selection.is_selected(&RouteId::from("1")));

        // The stale deadline must not disturb whatever happened since.
        ac.set_query("45", &index);
        ac.on_close_deadline(token);
        assert!(ac.state().open);
    }

    #[test]
    fn refresh_invalidates_a_pending_close() {
        let (mut ac, index, _, _) = setup();
        ac.set_query("12", &index);
        let token = ac.on_blur();
        ac.on_focus(&index); // user came right back
        ac.on_close_deadline(token);
        assert!(ac.state().open);
    }

    #[test]
    fn global_keys_only_fire_while_mounted() {
        let (mut ac, index, mut selection, mut surface) = setup();
        selection
            .select(&RouteId::from("1"), None, &index, &mut surface)
            .unwrap();

        // Not mounted yet: everything is ignored.
        assert_eq!(
            ac.on_global_key(GlobalKey::Escape, false, &mut selection, &mut surface),
            GlobalAction::Ignored
        );
        assert!(selection.selected().is_some());

        ac.mount();
        assert_eq!(
            ac.on_global_key(GlobalKey::Slash, false, &mut selection, &mut surface),
            GlobalAction::FocusSearch
        );
        // '/' while another input has focus is normal typing.
        assert_eq!(
            ac.on_global_key(GlobalKey::Slash, true, &mut selection, &mut surface),
            GlobalAction::Ignored
        );
        assert_eq!(
            ac.on_global_key(GlobalKey::Escape, false, &mut selection, &mut surface),
            GlobalAction::Deselected
        );
        assert_eq!(selection.selected(), None);

        ac.unmount();
        assert_eq!(
            ac.on_global_key(GlobalKey::Slash, false, &mut selection, &mut surface),
            GlobalAction::Ignored
        );
    }

    #[test]
    fn unmount_cancels_a_pending_close() {
        let (mut ac, index, _, _) = setup();
        ac.mount();
        ac.set_query("12", &index);
        let token = ac.on_blur();
        ac.unmount();
        ac.on_close_deadline(token);
        // The token went stale at unmount; state is whatever it was.
        assert!(ac.state().open);
    }

    #[test]
    fn repeated_mount_unmount_does_not_double_fire() {
        let (mut ac, _, mut selection, mut surface) = setup();
        ac.mount();
        ac.mount();
        ac.unmount();
        assert_eq!(
            ac.on_global_key(GlobalKey::Escape, false, &mut selection, &mut surface),
            GlobalAction::Ignored
        );
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn open_is_false_whenever_suggestions_is_empty() {
        let (mut ac, index, _, _) = setup();
        for query in ["", "12", "zzz", "plaza", "   "] {
            ac.set_query(query, &index);
            let state = ac.state();
            if state.suggestions.is_empty() {
                assert!(!state.open, "query {:?}", query);
            } else {
                assert!(state.open);
                let active = state.active_index.unwrap();
                assert!(active < state.suggestions.len());
            }
        }
    }
}
