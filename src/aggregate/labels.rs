use crate::aggregate::overview::join_trips;
use crate::aggregate::utility::natural_cmp;
use crate::models::{Route, Trip};
use serde::Serialize;
use std::collections::HashSet;

pub const UNNAMED_ROUTE: &str = "Unnamed Route";

/// Short name, else long name, else [`UNNAMED_ROUTE`].
pub fn route_name(route: &Route) -> &str {
    route
        .route_short_name
        .as_deref()
        .or(route.route_long_name.as_deref())
        .unwrap_or(UNNAMED_ROUTE)
}

/// Label shown in the route selector, e.g. `"1 – Island Bay - Wellington"`.
pub fn explorer_label(route: &Route) -> String {
    format!(
        "{} – {}",
        route_name(route),
        route.route_long_name.as_deref().unwrap_or("")
    )
}

/// Bar chart label, `"<short> - <long>"` with missing parts left empty.
pub fn chart_label(route: &Route) -> String {
    format!(
        "{} - {}",
        route.route_short_name.as_deref().unwrap_or(""),
        route.route_long_name.as_deref().unwrap_or("")
    )
}

/// A selectable route in the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOption {
    pub route_id: String,
    pub label: String,
}

/// Routes that have at least one trip, in natural route-id order.
pub fn route_options(routes: &[Route], trips: &[Trip]) -> Vec<RouteOption> {
    let mut seen = HashSet::new();
    let mut options: Vec<RouteOption> = join_trips(routes, trips)
        .into_iter()
        .filter(|(route, _)| seen.insert(route.route_id.as_str()))
        .map(|(route, _)| RouteOption {
            route_id: route.route_id.clone(),
            label: explorer_label(route),
        })
        .collect();
    options.sort_by(|a, b| natural_cmp(&a.route_id, &b.route_id));
    options
}

/// Resolves a user selection by route id, then exact label, then label
/// ignoring case.
///
/// Labels are compared trimmed on both sides: a route without a long name
/// is labelled `"2 – "`, and the trailing space never survives a prompt.
pub fn find_route_option<'a>(options: &'a [RouteOption], query: &str) -> Option<&'a RouteOption> {
    let query = query.trim();
    let lowered = query.to_lowercase();
    options
        .iter()
        .find(|o| o.route_id == query)
        .or_else(|| options.iter().find(|o| o.label.trim() == query))
        .or_else(|| options.iter().find(|o| o.label.trim().to_lowercase() == lowered))
}
