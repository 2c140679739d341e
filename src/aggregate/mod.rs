//! Pure aggregation over fetched GTFS records.
//!
//! Joins trips to routes, counts trips per route and per shape, ranks
//! routes, derives display labels and summarizes a single route. Nothing
//! here performs I/O; empty input always yields zero counts or `None`
//! instead of an error.

pub mod labels;
pub mod overview;
pub mod route;
pub mod utility;

pub use labels::{RouteOption, UNNAMED_ROUTE, chart_label, explorer_label, find_route_option, route_name, route_options};
pub use overview::{OverviewSummary, RouteTripCount, join_trips, summarize_overview, top_routes, trip_counts_by_route};
pub use route::{
    Directionality, NO_SHAPE, RouteSummary, ShapeDirectionGroup, ShapeTripCount, distinct_shape_ids, route_trips,
    shape_direction_groups, shape_trip_counts, summarize_route,
};
