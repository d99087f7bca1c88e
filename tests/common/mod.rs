//! Shared test utilities and fixtures.

#![allow(dead_code)]

use rutero::{parse_route_collection, RouteIndex};

// Re-export canonical test utilities from rutero::testing
pub use rutero::testing::{make_route, sample_index, RecordingSurface, SurfaceCall};

/// A small but representative feed: a numbered route, a named-only route,
/// a malformed row (id only), and a geometry the engine cannot frame.
pub const SAMPLE_COLLECTION: &str = r##"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"id": 1, "numero_ruta": "12", "nombre_ruta": "Centro", "color": "#cc0000"},
            "geometry": {"type": "LineString",
                         "coordinates": [[-89.65, 20.95], [-89.60, 21.00], [-89.58, 21.02]]}
        },
        {
            "type": "Feature",
            "properties": {"id": 2, "numero_ruta": "45", "nombre_ruta": "Plaza Norte"},
            "geometry": {"type": "MultiLineString",
                         "coordinates": [[[-89.70, 20.90], [-89.66, 20.93]],
                                          [[-89.66, 20.93], [-89.61, 20.98]]]}
        },
        {
            "type": "Feature",
            "properties": {"id": 3, "nombre_ruta": "Periférico"},
            "geometry": {"type": "LineString",
                         "coordinates": [[-89.80, 20.85], [-89.45, 21.17]]}
        },
        {
            "type": "Feature",
            "properties": {"id": 4},
            "geometry": {"type": "Point", "coordinates": [-89.62, 20.97]}
        }
    ]
}"##;

/// Parse and index `SAMPLE_COLLECTION`.
pub fn load_sample_index() -> RouteIndex {
    RouteIndex::build(parse_route_collection(SAMPLE_COLLECTION).expect("fixture parses"))
}
