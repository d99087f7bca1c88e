// Copyright 2025-present Rutero contributors
// SPDX-License-Identifier: Apache-2.0

//! Route feed parsing.
//!
//! The upstream service answers with a GeoJSON FeatureCollection in which
//! each feature carries `id` and optionally `numero_ruta`, `nombre_ruta`,
//! `color` and `activo` properties. This module turns that document into
//! plain [`Route`] values and nothing more; drawing the collection is the
//! map collaborator's job.
//!
//! Geometry handling is deliberately forgiving: `LineString` and
//! `MultiLineString` become coordinate paths, every other geometry type
//! becomes an empty path list ("no bounding region"), never an error.

use crate::types::{LngLat, Route, RouteId, FALLBACK_COLOR};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Error raised while decoding the route collection.
#[derive(Debug)]
pub enum FeedError {
    /// The document is not valid JSON.
    Json(serde_json::Error),
    /// The document parsed but is not a FeatureCollection.
    NotFeatureCollection { found: String },
    /// A feature has no usable `id` property.
    MissingId { feature: usize },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Json(err) => write!(f, "invalid JSON: {}", err),
            FeedError::NotFeatureCollection { found } => {
                write!(f, "expected a FeatureCollection, found '{}'", found)
            }
            FeedError::MissingId { feature } => {
                write!(f, "feature {} has no 'id' property", feature)
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Json(err)
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: RawProperties,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    numero_ruta: Value,
    #[serde(default)]
    nombre_ruta: Value,
    #[serde(default)]
    color: Value,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse a GeoJSON FeatureCollection document into routes.
///
/// Malformed features (missing both number and name) are kept: the index
/// gives them a placeholder label rather than silently hiding data. A
/// missing `id`, on the other hand, is a hard error: every route must be
/// addressable by the selection logic.
pub fn parse_route_collection(document: &str) -> Result<Vec<Route>, FeedError> {
    let raw: RawCollection = serde_json::from_str(document)?;
    if raw.kind != "FeatureCollection" {
        return Err(FeedError::NotFeatureCollection { found: raw.kind });
    }

    let mut routes = Vec::with_capacity(raw.features.len());
    for (position, feature) in raw.features.into_iter().enumerate() {
        let id = scalar_to_string(&feature.properties.id)
            .ok_or(FeedError::MissingId { feature: position })?;
        let geometry = feature
            .geometry
            .as_ref()
            .map(geometry_paths)
            .unwrap_or_default();

        routes.push(Route {
            id: RouteId::new(id),
            number: scalar_to_string(&feature.properties.numero_ruta),
            name: scalar_to_string(&feature.properties.nombre_ruta),
            color: scalar_to_string(&feature.properties.color)
                .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
            geometry,
        });
    }

    tracing::debug!(routes = routes.len(), "parsed route collection");
    Ok(routes)
}

/// Render a scalar property as a string; `null`, missing, and empty values
/// all count as absent. The feed stores route numbers as integers in some
/// deployments and as strings in others.
fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extract coordinate paths from a geometry.
///
/// Unsupported geometry types and malformed coordinate arrays both yield an
/// empty path list, which downstream means "no bounding region".
fn geometry_paths(geometry: &RawGeometry) -> Vec<Vec<LngLat>> {
    match geometry.kind.as_str() {
        "LineString" => parse_path(&geometry.coordinates)
            .map(|path| vec![path])
            .unwrap_or_default(),
        "MultiLineString" => match geometry.coordinates.as_array() {
            Some(lines) => lines.iter().filter_map(parse_path).collect(),
            None => Vec::new(),
        },
        other => {
            tracing::debug!(geometry = other, "unsupported geometry type, no bounding region");
            Vec::new()
        }
    }
}

fn parse_path(coordinates: &Value) -> Option<Vec<LngLat>> {
    let positions = coordinates.as_array()?;
    let mut path = Vec::with_capacity(positions.len());
    for position in positions {
        let pair = position.as_array()?;
        let lng = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        path.push(LngLat::new(lng, lat));
    }
    Some(path)
}
