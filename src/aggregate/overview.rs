use crate::aggregate::utility::{mean, natural_cmp};
use crate::models::{Route, Trip};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of distinct trips run on one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTripCount {
    pub route_id: String,
    pub trips: usize,
}

/// Network-wide metrics for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSummary {
    /// Routes with at least one joined trip.
    pub total_routes: usize,
    /// Distinct route ids returned by the routes endpoint.
    pub catalog_routes: usize,
    /// Distinct trip ids over the joined trips.
    pub total_trips: usize,
    pub mean_trips_per_route: f64,
    pub busiest: Option<RouteTripCount>,
    pub quietest: Option<RouteTripCount>,
    /// Trip counts for every route, in natural route-id order.
    pub route_counts: Vec<RouteTripCount>,
}

/// Inner join of trips onto routes by `route_id`.
///
/// Trips whose route is not in `routes` are dropped. If `routes` repeats an
/// id, the first occurrence is used.
pub fn join_trips<'a>(routes: &'a [Route], trips: &'a [Trip]) -> Vec<(&'a Route, &'a Trip)> {
    let mut by_id: HashMap<&str, &Route> = HashMap::with_capacity(routes.len());
    for route in routes {
        by_id.entry(route.route_id.as_str()).or_insert(route);
    }

    trips
        .iter()
        .filter_map(|trip| by_id.get(trip.route_id.as_str()).map(|route| (*route, trip)))
        .collect()
}

/// Distinct trip ids per route over the joined trips, in natural route-id order.
pub fn trip_counts_by_route(routes: &[Route], trips: &[Trip]) -> Vec<RouteTripCount> {
    let mut groups: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (route, trip) in join_trips(routes, trips) {
        groups
            .entry(route.route_id.as_str())
            .or_default()
            .insert(trip.trip_id.as_str());
    }

    let mut counts: Vec<RouteTripCount> = groups
        .into_iter()
        .map(|(route_id, trip_ids)| RouteTripCount {
            route_id: route_id.to_string(),
            trips: trip_ids.len(),
        })
        .collect();
    counts.sort_by(|a, b| natural_cmp(&a.route_id, &b.route_id));
    counts
}

pub fn summarize_overview(routes: &[Route], trips: &[Trip]) -> OverviewSummary {
    let route_counts = trip_counts_by_route(routes, trips);

    let catalog_routes = routes
        .iter()
        .map(|r| r.route_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let total_trips = join_trips(routes, trips)
        .into_iter()
        .map(|(_, trip)| trip.trip_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let per_route: Vec<f64> = route_counts.iter().map(|c| c.trips as f64).collect();

    // route_counts is already in natural order, so keeping the first of
    // equal counts breaks ties towards the smallest route id
    let busiest = route_counts
        .iter()
        .reduce(|best, c| if c.trips > best.trips { c } else { best })
        .cloned();
    let quietest = route_counts
        .iter()
        .reduce(|best, c| if c.trips < best.trips { c } else { best })
        .cloned();

    OverviewSummary {
        total_routes: route_counts.len(),
        catalog_routes,
        total_trips,
        mean_trips_per_route: mean(&per_route),
        busiest,
        quietest,
        route_counts,
    }
}

/// The `n` routes with the most trips; equal counts keep natural route-id order.
pub fn top_routes(counts: &[RouteTripCount], n: usize) -> Vec<RouteTripCount> {
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| {
        b.trips
            .cmp(&a.trips)
            .then_with(|| natural_cmp(&a.route_id, &b.route_id))
    });
    ranked.truncate(n);
    ranked
}
