//! Typed GTFS records returned by the Metlink API.
//!
//! Records are validated while deserializing: identifiers are accepted as
//! JSON strings or numbers and normalized to trimmed strings, blank optional
//! text becomes `None`, and `direction_id` must be 0 or 1. Fields the API
//! sends that are not listed here are ignored.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A transit route (`/gtfs/routes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(deserialize_with = "required_id")]
    pub route_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub agency_id: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_short_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_long_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_desc: Option<String>,
    #[serde(default)]
    pub route_type: Option<u16>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_color: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_text_color: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub route_url: Option<String>,
}

impl Route {
    /// Route with only the identifying fields set.
    pub fn new(
        route_id: impl Into<String>,
        short_name: Option<&str>,
        long_name: Option<&str>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            agency_id: None,
            route_short_name: short_name.map(str::to_string),
            route_long_name: long_name.map(str::to_string),
            route_desc: None,
            route_type: None,
            route_color: None,
            route_text_color: None,
            route_url: None,
        }
    }
}

/// Travel direction of a trip, GTFS `direction_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    Outbound,
    Inbound,
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Outbound),
            1 => Ok(Direction::Inbound),
            other => Err(format!("direction_id must be 0 or 1, got {other}")),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Outbound => 0,
            Direction::Inbound => 1,
        }
    }
}

/// A scheduled trip (`/gtfs/trips`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(deserialize_with = "required_id")]
    pub trip_id: String,
    #[serde(deserialize_with = "required_id")]
    pub route_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub shape_id: Option<String>,
    #[serde(default)]
    pub direction_id: Option<Direction>,
    #[serde(default, deserialize_with = "optional_id")]
    pub service_id: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub trip_headsign: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub block_id: Option<String>,
}

impl Trip {
    pub fn new(
        trip_id: impl Into<String>,
        route_id: impl Into<String>,
        shape_id: Option<&str>,
        direction_id: Option<Direction>,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            route_id: route_id.into(),
            shape_id: shape_id.map(str::to_string),
            direction_id,
            service_id: None,
            trip_headsign: None,
            block_id: None,
        }
    }
}

/// One vertex of a shape polyline (`/gtfs/shapes?shape_id=`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    #[serde(deserialize_with = "required_id")]
    pub shape_id: String,
    #[serde(deserialize_with = "number_from_any")]
    pub shape_pt_lat: f64,
    #[serde(deserialize_with = "number_from_any")]
    pub shape_pt_lon: f64,
    #[serde(deserialize_with = "number_from_any")]
    pub shape_pt_sequence: u32,
    #[serde(default)]
    pub shape_dist_traveled: Option<f64>,
}

/// A stop served by a route (`/gtfs/stops?route_id=`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(deserialize_with = "required_id")]
    pub stop_id: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub stop_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub stop_name: Option<String>,
    #[serde(deserialize_with = "number_from_any")]
    pub stop_lat: f64,
    #[serde(deserialize_with = "number_from_any")]
    pub stop_lon: f64,
    #[serde(default, deserialize_with = "optional_id")]
    pub zone_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub parent_station: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawId {
    fn normalize(self) -> String {
        match self {
            RawId::Text(s) => s.trim().to_string(),
            RawId::Integer(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = RawId::deserialize(deserializer)?.normalize();
    if id.is_empty() {
        return Err(de::Error::custom("identifier is empty"));
    }
    Ok(id)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(RawId::normalize)
        .filter(|id| !id.is_empty()))
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn number_from_any<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}
