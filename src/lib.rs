//! Fuzzy route search and selection for a transit map viewer.
//!
//! The crate turns a typed query into a ranked list of candidate bus routes
//! and a user gesture into exactly one committed selection, with the
//! highlight and label state the map should show at every step. The map
//! itself (tiles, layers, popups) stays behind the [`MapSurface`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  normalize   │───▶│   index.rs   │───▶│  matcher.rs  │
//! │ (case fold,  │    │ (RouteIndex, │    │ (two-channel │
//! │  diacritics) │    │  IndexEntry) │    │   scoring)   │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │ ranked candidates
//!                                                ▼
//! ┌──────────────┐    commits    ┌──────────────────────┐
//! │ selection.rs │◀──────────────│   autocomplete.rs    │
//! │ (highlight + │               │ (query, active row,  │
//! │  label state)│               │  open/closed, blur)  │
//! └──────┬───────┘               └──────────────────────┘
//!        │ MapSurface calls
//!        ▼
//!   external map
//! ```
//!
//! # Usage
//!
//! ```
//! use rutero::{
//!     match_routes_default, AutocompleteController, Key, RouteIndex,
//!     SelectionController,
//! };
//! # use rutero::testing::{make_route, RecordingSurface};
//!
//! let index = RouteIndex::build(vec![make_route("1", Some("12"), Some("Centro"))]);
//! let mut autocomplete = AutocompleteController::new();
//! let mut selection = SelectionController::new();
//! # let mut map = RecordingSurface::default();
//!
//! autocomplete.set_query("ruta 12", &index);
//! autocomplete.on_key(Key::Enter, &index, &mut selection, &mut map)?;
//! assert!(selection.is_selected(&"1".into()));
//! # Ok::<(), rutero::SelectionError>(())
//! ```
//!
//! Until the route collection has been fetched, hosts use
//! `RouteIndex::default()`: searching it yields nothing, which is the valid
//! "no data yet" idle state rather than an error.

// Module declarations
mod autocomplete;
mod feed;
mod index;
mod matcher;
mod normalize;
mod selection;
pub mod testing;
mod types;

// Re-exports for public API
pub use autocomplete::{
    AutocompleteController, AutocompleteState, CloseToken, Effect, GlobalAction, GlobalKey, Key,
    Suggestion,
};
pub use feed::{parse_route_collection, FeedError};
pub use index::{IndexEntry, RouteIndex, UNNAMED_LABEL};
pub use matcher::{
    match_routes, match_routes_default, Candidate, DEFAULT_LIMIT, SCORE_NAME_EXACT,
    SCORE_NAME_PREFIX, SCORE_NAME_SUBSTRING, SCORE_NUMBER_EXACT, SCORE_NUMBER_PREFIX,
    SCORE_NUMBER_SUBSTRING,
};
pub use normalize::normalize;
pub use selection::{MapSurface, SelectionController, SelectionError};
pub use types::{
    BoundingRegion, FrameOptions, HighlightFilter, LabelContent, LngLat, Route, RouteId,
    FALLBACK_COLOR,
};
