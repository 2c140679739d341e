use crate::aggregate::{
    OverviewSummary, RouteSummary, ShapeDirectionGroup, ShapeTripCount, chart_label, summarize_overview, top_routes,
};
use crate::models::{Route, Trip};
use crate::presentation::map::MapOverlay;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Number of routes in the overview bar chart.
pub const TOP_ROUTES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub route_id: String,
    pub label: String,
    pub trips: usize,
}

/// Everything the overview page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub summary: OverviewSummary,
    pub top_routes: Vec<ChartBar>,
    /// When the routes/trips behind this view were fetched, if known.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl OverviewView {
    pub fn build(routes: &[Route], trips: &[Trip]) -> Self {
        let summary = summarize_overview(routes, trips);

        // first record per id, matching join_trips
        let mut by_id: HashMap<&str, &Route> = HashMap::with_capacity(routes.len());
        for route in routes {
            by_id.entry(route.route_id.as_str()).or_insert(route);
        }

        let top_routes = top_routes(&summary.route_counts, TOP_ROUTES)
            .into_iter()
            .map(|count| ChartBar {
                label: by_id
                    .get(count.route_id.as_str())
                    .map(|r| chart_label(r))
                    .unwrap_or_else(|| " - ".to_string()),
                route_id: count.route_id,
                trips: count.trips,
            })
            .collect();

        Self {
            summary,
            top_routes,
            loaded_at: None,
        }
    }

    pub fn loaded_at(mut self, loaded_at: DateTime<Utc>) -> Self {
        self.loaded_at = Some(loaded_at);
        self
    }
}

/// Everything the route explorer shows for the selected route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExplorerView {
    pub label: String,
    pub summary: RouteSummary,
    pub shape_counts: Vec<ShapeTripCount>,
    pub shape_groups: Vec<ShapeDirectionGroup>,
    pub map: MapOverlay,
    pub trips: Vec<Trip>,
}
