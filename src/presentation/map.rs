//! Map overlay for the route explorer: one polyline per shape, one marker
//! per stop. Drawing is left to whatever consumes the GeoJSON export.

use crate::models::{ShapePoint, Stop};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

/// Line colors, assigned to shapes in turn and reused once exhausted.
pub const PALETTE: [&str; 8] = [
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "darkred",
    "cadetblue",
    "black",
];

pub const STOP_COLOR: &str = "red";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub shape_id: String,
    pub color: &'static str,
    /// `(lat, lon)` in `shape_pt_sequence` order.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopMarker {
    pub stop_id: String,
    pub popup: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapOverlay {
    /// Mean position of the first shape that has points.
    pub center: Option<(f64, f64)>,
    pub polylines: Vec<Polyline>,
    pub markers: Vec<StopMarker>,
}

impl MapOverlay {
    /// Builds the overlay from shapes in drawing order.
    ///
    /// A shape with no points draws nothing but still takes its palette
    /// slot, so colors stay stable for the shapes that do have geometry.
    pub fn build(shapes: &[(String, Vec<ShapePoint>)], stops: &[Stop]) -> Self {
        let polylines: Vec<Polyline> = shapes
            .iter()
            .enumerate()
            .filter(|(_, (_, points))| !points.is_empty())
            .map(|(idx, (shape_id, points))| {
                let mut ordered: Vec<&ShapePoint> = points.iter().collect();
                ordered.sort_by_key(|p| p.shape_pt_sequence);
                Polyline {
                    shape_id: shape_id.clone(),
                    color: PALETTE[idx % PALETTE.len()],
                    points: ordered
                        .into_iter()
                        .map(|p| (p.shape_pt_lat, p.shape_pt_lon))
                        .collect(),
                }
            })
            .collect();

        let center = polylines.first().map(|line| {
            let n = line.points.len() as f64;
            let (lat, lon) = line
                .points
                .iter()
                .fold((0.0, 0.0), |(lat, lon), (p_lat, p_lon)| (lat + p_lat, lon + p_lon));
            (lat / n, lon / n)
        });

        let markers = stops
            .iter()
            .map(|stop| StopMarker {
                stop_id: stop.stop_id.clone(),
                popup: format!(
                    "{} (ID: {})",
                    stop.stop_name.as_deref().unwrap_or(&stop.stop_id),
                    stop.stop_id
                ),
                lat: stop.stop_lat,
                lon: stop.stop_lon,
            })
            .collect();

        Self {
            center,
            polylines,
            markers,
        }
    }

    pub fn has_shapes(&self) -> bool {
        !self.polylines.is_empty()
    }

    /// GeoJSON with simplestyle properties: a `LineString` per shape and a
    /// `Point` per stop. Positions are `[lon, lat]`.
    pub fn to_geojson(&self) -> FeatureCollection {
        let lines = self.polylines.iter().map(|line| {
            let mut properties = JsonObject::new();
            properties.insert("shape_id".to_string(), line.shape_id.clone().into());
            properties.insert("stroke".to_string(), line.color.into());
            properties.insert("stroke-width".to_string(), 4.into());
            properties.insert("stroke-opacity".to_string(), 0.6.into());
            properties.insert("title".to_string(), format!("Shape ID: {}", line.shape_id).into());

            let coords = line.points.iter().map(|(lat, lon)| vec![*lon, *lat]).collect();
            feature(Value::LineString(coords), properties)
        });

        let markers = self.markers.iter().map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("stop_id".to_string(), marker.stop_id.clone().into());
            properties.insert("title".to_string(), marker.popup.clone().into());
            properties.insert("marker-color".to_string(), STOP_COLOR.into());

            feature(Value::Point(vec![marker.lon, marker.lat]), properties)
        });

        FeatureCollection {
            bbox: None,
            features: lines.chain(markers).collect(),
            foreign_members: None,
        }
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
