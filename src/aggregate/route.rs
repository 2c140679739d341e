use crate::aggregate::utility::natural_cmp;
use crate::models::{Direction, Stop, Trip};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Bucket label for trips without a `shape_id`.
pub const NO_SHAPE: &str = "No Shape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Directionality {
    OneWay,
    TwoWay,
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directionality::OneWay => f.write_str("One-way"),
            Directionality::TwoWay => f.write_str("Two-way"),
        }
    }
}

/// Headline numbers for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub route_id: String,
    pub total_trips: usize,
    pub unique_shapes: usize,
    pub unique_stops: usize,
    pub directionality: Directionality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeTripCount {
    pub shape_id: Option<String>,
    pub trips: usize,
}

impl ShapeTripCount {
    pub fn label(&self) -> &str {
        self.shape_id.as_deref().unwrap_or(NO_SHAPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeDirectionGroup {
    pub shape_id: String,
    pub direction_id: Option<Direction>,
    pub trips: usize,
}

/// Trips belonging to `route_id` (compared after trimming).
pub fn route_trips(trips: &[Trip], route_id: &str) -> Vec<Trip> {
    let route_id = route_id.trim();
    trips
        .iter()
        .filter(|t| t.route_id == route_id)
        .cloned()
        .collect()
}

/// Summarizes a route from its trips and the stops fetched for it.
///
/// Directionality is one-way exactly when the trips carry a single distinct
/// `direction_id`; trips without a direction are not counted.
pub fn summarize_route(route_id: &str, route_trips: &[Trip], stops: &[Stop]) -> RouteSummary {
    let unique_shapes = route_trips
        .iter()
        .filter_map(|t| t.shape_id.as_deref())
        .collect::<HashSet<_>>()
        .len();
    let unique_stops = stops
        .iter()
        .map(|s| s.stop_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let directions = route_trips
        .iter()
        .filter_map(|t| t.direction_id)
        .collect::<HashSet<_>>()
        .len();

    RouteSummary {
        route_id: route_id.trim().to_string(),
        total_trips: route_trips.len(),
        unique_shapes,
        unique_stops,
        directionality: if directions == 1 {
            Directionality::OneWay
        } else {
            Directionality::TwoWay
        },
    }
}

/// Trips per shape, most used first. Trips without a shape share one
/// bucket, which sorts after real shapes on equal counts.
pub fn shape_trip_counts(route_trips: &[Trip]) -> Vec<ShapeTripCount> {
    let mut buckets: HashMap<Option<&str>, usize> = HashMap::new();
    for trip in route_trips {
        *buckets.entry(trip.shape_id.as_deref()).or_default() += 1;
    }

    let mut counts: Vec<ShapeTripCount> = buckets
        .into_iter()
        .map(|(shape_id, trips)| ShapeTripCount {
            shape_id: shape_id.map(str::to_string),
            trips,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.trips
            .cmp(&a.trips)
            .then_with(|| cmp_optional_ids(a.shape_id.as_deref(), b.shape_id.as_deref()))
    });
    counts
}

/// Trips grouped by `(shape_id, direction_id)`, ordered by shape then
/// direction. Trips without a shape are left out.
pub fn shape_direction_groups(route_trips: &[Trip]) -> Vec<ShapeDirectionGroup> {
    let mut groups: HashMap<(&str, Option<Direction>), usize> = HashMap::new();
    for trip in route_trips {
        if let Some(shape_id) = trip.shape_id.as_deref() {
            *groups.entry((shape_id, trip.direction_id)).or_default() += 1;
        }
    }

    let mut groups: Vec<ShapeDirectionGroup> = groups
        .into_iter()
        .map(|((shape_id, direction_id), trips)| ShapeDirectionGroup {
            shape_id: shape_id.to_string(),
            direction_id,
            trips,
        })
        .collect();
    groups.sort_by(|a, b| {
        natural_cmp(&a.shape_id, &b.shape_id).then_with(|| a.direction_id.cmp(&b.direction_id))
    });
    groups
}

/// Shape ids to draw, in group order without repeats.
pub fn distinct_shape_ids(groups: &[ShapeDirectionGroup]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    groups
        .iter()
        .filter(|g| seen.insert(g.shape_id.as_str()))
        .map(|g| g.shape_id.clone())
        .collect()
}

fn cmp_optional_ids(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => natural_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction::{Inbound, Outbound};

    fn trip(id: &str, shape: Option<&str>, direction: Option<Direction>) -> Trip {
        Trip::new(id, "14", shape, direction)
    }

    fn stop(id: &str) -> Stop {
        Stop {
            stop_id: id.to_string(),
            stop_code: None,
            stop_name: Some(format!("Stop {id}")),
            stop_lat: -41.29,
            stop_lon: 174.78,
            zone_id: None,
            parent_station: None,
        }
    }

    #[test]
    fn test_route_trips_filters_by_trimmed_id() {
        let trips = vec![
            Trip::new("a", "14", None, None),
            Trip::new("b", "2", None, None),
            Trip::new("c", "14", None, None),
        ];
        let selected = route_trips(&trips, " 14");
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|t| t.route_id == "14"));
    }

    #[test]
    fn test_summarize_two_way_route() {
        let trips = vec![
            trip("a", Some("s1"), Some(Outbound)),
            trip("b", Some("s2"), Some(Inbound)),
            trip("c", Some("s1"), Some(Outbound)),
            trip("d", None, Some(Inbound)),
        ];
        let stops = vec![stop("5000"), stop("5002"), stop("5000")];

        let summary = summarize_route("14", &trips, &stops);
        assert_eq!(summary.total_trips, 4);
        assert_eq!(summary.unique_shapes, 2);
        assert_eq!(summary.unique_stops, 2);
        assert_eq!(summary.directionality, Directionality::TwoWay);
    }

    #[test]
    fn test_one_way_iff_single_direction() {
        let one_way = vec![trip("a", None, Some(Inbound)), trip("b", None, Some(Inbound)), trip("c", None, None)];
        assert_eq!(summarize_route("14", &one_way, &[]).directionality, Directionality::OneWay);

        let no_direction = vec![trip("a", None, None)];
        assert_eq!(summarize_route("14", &no_direction, &[]).directionality, Directionality::TwoWay);
    }

    #[test]
    fn test_summarize_empty_route() {
        let summary = summarize_route("14", &[], &[]);
        assert_eq!(summary.total_trips, 0);
        assert_eq!(summary.unique_shapes, 0);
        assert_eq!(summary.unique_stops, 0);
        assert_eq!(summary.directionality, Directionality::TwoWay);
    }

    #[test]
    fn test_shape_trip_counts_with_no_shape_bucket() {
        let trips = vec![
            trip("a", Some("s2"), None),
            trip("b", None, None),
            trip("c", Some("s1"), None),
            trip("d", Some("s1"), None),
            trip("e", None, None),
            trip("f", Some("s3"), None),
        ];

        let counts = shape_trip_counts(&trips);
        let labels: Vec<_> = counts.iter().map(|c| (c.label(), c.trips)).collect();
        assert_eq!(labels, vec![("s1", 2), (NO_SHAPE, 2), ("s2", 1), ("s3", 1)]);
        assert_eq!(counts.iter().map(|c| c.trips).sum::<usize>(), trips.len());
    }

    #[test]
    fn test_shape_direction_groups_drop_missing_shapes() {
        let trips = vec![
            trip("a", Some("s2"), Some(Inbound)),
            trip("b", None, Some(Outbound)),
            trip("c", Some("s1"), Some(Outbound)),
            trip("d", Some("s2"), Some(Outbound)),
            trip("e", Some("s2"), Some(Inbound)),
        ];

        let groups = shape_direction_groups(&trips);
        assert_eq!(
            groups,
            vec![
                ShapeDirectionGroup { shape_id: "s1".into(), direction_id: Some(Outbound), trips: 1 },
                ShapeDirectionGroup { shape_id: "s2".into(), direction_id: Some(Outbound), trips: 1 },
                ShapeDirectionGroup { shape_id: "s2".into(), direction_id: Some(Inbound), trips: 2 },
            ]
        );
        assert_eq!(distinct_shape_ids(&groups), vec!["s1".to_string(), "s2".to_string()]);
    }

    #[test]
    fn test_no_shapes_means_nothing_to_draw() {
        let trips = vec![trip("a", None, Some(Outbound))];
        let groups = shape_direction_groups(&trips);
        assert!(groups.is_empty());
        assert!(distinct_shape_ids(&groups).is_empty());
    }
}
