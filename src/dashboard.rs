//! One pass per interaction: load (or reuse) the session data, fetch what
//! the page needs, aggregate, and hand back a view model.

use crate::aggregate::{
    RouteOption, distinct_shape_ids, find_route_option, route_options, route_trips, shape_direction_groups,
    shape_trip_counts, summarize_route,
};
use crate::error::DashboardError;
use crate::fetch::{GtfsApi, HttpClient};
use crate::presentation::{MapOverlay, OverviewView, RouteExplorerView};
use crate::session::SessionCache;
use tracing::{debug, info};

pub struct Dashboard<C> {
    api: GtfsApi<C>,
    session: SessionCache,
}

impl<C: HttpClient> Dashboard<C> {
    pub fn new(api: GtfsApi<C>) -> Self {
        Self {
            api,
            session: SessionCache::new(),
        }
    }

    pub fn session(&self) -> &SessionCache {
        &self.session
    }

    /// Drops the memoized routes/trips; the next page load fetches again.
    pub fn reset(&mut self) {
        self.session.invalidate();
    }

    #[tracing::instrument(skip(self))]
    pub async fn overview(&mut self) -> Result<OverviewView, DashboardError> {
        let snapshot = self.session.get_or_load(&self.api).await?;
        Ok(OverviewView::build(&snapshot.routes, &snapshot.trips).loaded_at(snapshot.loaded_at))
    }

    pub async fn route_options(&mut self) -> Result<Vec<RouteOption>, DashboardError> {
        let snapshot = self.session.get_or_load(&self.api).await?;
        Ok(route_options(&snapshot.routes, &snapshot.trips))
    }

    /// Builds the explorer page for a route given by id or label.
    ///
    /// Stops and shapes are fetched on every call, one request at a time.
    #[tracing::instrument(skip(self))]
    pub async fn explore(&mut self, selection: &str) -> Result<RouteExplorerView, DashboardError> {
        let snapshot = self.session.get_or_load(&self.api).await?;

        let options = route_options(&snapshot.routes, &snapshot.trips);
        let option = find_route_option(&options, selection)
            .ok_or_else(|| DashboardError::UnknownRoute(selection.to_string()))?;
        info!(route_id = %option.route_id, label = %option.label, "Exploring route");

        let trips = route_trips(&snapshot.trips, &option.route_id);
        let stops = self.api.fetch_stops(&option.route_id).await?;

        let shape_groups = shape_direction_groups(&trips);
        let shape_ids = distinct_shape_ids(&shape_groups);
        debug!(shapes = shape_ids.len(), stops = stops.len(), "Fetching route geometry");

        let mut shapes = Vec::with_capacity(shape_ids.len());
        for shape_id in shape_ids {
            let points = self.api.fetch_shape(&shape_id).await?;
            shapes.push((shape_id, points));
        }

        Ok(RouteExplorerView {
            label: option.label.clone(),
            summary: summarize_route(&option.route_id, &trips, &stops),
            shape_counts: shape_trip_counts(&trips),
            shape_groups,
            map: MapOverlay::build(&shapes, &stops),
            trips,
        })
    }
}
