use super::{HttpClient, fetch_json};
use crate::error::FetchError;
use crate::models::{Route, ShapePoint, Stop, Trip};
use crate::persist::CsvCache;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Typed access to the four GTFS endpoints of the Metlink API.
///
/// Every call issues exactly one request. When a [`CsvCache`] is attached
/// the result is also dumped to CSV; a failed dump is logged and does not
/// fail the call.
pub struct GtfsApi<C> {
    client: C,
    base_url: reqwest::Url,
    cache: Option<CsvCache>,
}

impl<C: HttpClient> GtfsApi<C> {
    pub fn new(client: C, base_url: &str) -> Result<Self, FetchError> {
        // Url::join drops the last path segment unless it ends with '/'
        let base_url = if base_url.ends_with('/') {
            reqwest::Url::parse(base_url)?
        } else {
            reqwest::Url::parse(&format!("{base_url}/"))?
        };

        Ok(Self {
            client,
            base_url,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: CsvCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// All routes of the network.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_routes(&self) -> Result<Vec<Route>, FetchError> {
        let routes: Vec<Route> = fetch_json(&self.client, self.endpoint("gtfs/routes", None)?).await?;
        debug!(count = routes.len(), "Routes fetched");

        if let Some(cache) = &self.cache {
            store(cache, &cache.routes_path(), &routes);
        }
        Ok(routes)
    }

    /// All scheduled trips of the network.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_trips(&self) -> Result<Vec<Trip>, FetchError> {
        let trips: Vec<Trip> = fetch_json(&self.client, self.endpoint("gtfs/trips", None)?).await?;
        debug!(count = trips.len(), "Trips fetched");

        if let Some(cache) = &self.cache {
            store(cache, &cache.trips_path(), &trips);
        }
        Ok(trips)
    }

    /// Points of one shape, sorted by `shape_pt_sequence`.
    ///
    /// An unknown shape is not an error: the API answers with an empty body
    /// and this returns an empty vector.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_shape(&self, shape_id: &str) -> Result<Vec<ShapePoint>, FetchError> {
        let url = self.endpoint("gtfs/shapes", Some(("shape_id", shape_id)))?;
        let points: Option<Vec<ShapePoint>> = fetch_json(&self.client, url).await?;

        let mut points = points.unwrap_or_default();
        if points.is_empty() {
            warn!(shape_id, "No shape data found");
            return Ok(points);
        }

        points.sort_by_key(|p| p.shape_pt_sequence);
        debug!(count = points.len(), "Shape points fetched");

        if let Some(cache) = &self.cache {
            store(cache, &cache.shape_path(shape_id), &points);
        }
        Ok(points)
    }

    /// Stops served by one route.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_stops(&self, route_id: &str) -> Result<Vec<Stop>, FetchError> {
        let url = self.endpoint("gtfs/stops", Some(("route_id", route_id)))?;
        let stops: Vec<Stop> = fetch_json(&self.client, url).await?;
        debug!(count = stops.len(), "Stops fetched");

        if let Some(cache) = &self.cache {
            store(cache, &cache.stops_path(route_id), &stops);
        }
        Ok(stops)
    }

    fn endpoint(&self, path: &str, query: Option<(&str, &str)>) -> Result<reqwest::Url, FetchError> {
        let mut url = self.base_url.join(path)?;
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}

fn store<T: Serialize>(cache: &CsvCache, path: &Path, records: &[T]) {
    if let Err(e) = cache.write_records(path, records) {
        warn!(path = %path.display(), error = %e, "Failed to cache records");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = GtfsApi::new(BasicClient::new().unwrap(), "https://api.opendata.metlink.org.nz/v1").unwrap();
        let url = api.endpoint("gtfs/routes", None).unwrap();
        assert_eq!(url.as_str(), "https://api.opendata.metlink.org.nz/v1/gtfs/routes");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let api = GtfsApi::new(BasicClient::new().unwrap(), "https://example.org/v1/").unwrap();
        let url = api.endpoint("gtfs/shapes", Some(("shape_id", "30__1_a b"))).unwrap();
        assert_eq!(url.as_str(), "https://example.org/v1/gtfs/shapes?shape_id=30__1_a+b");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(GtfsApi::new(BasicClient::new().unwrap(), "not a url").is_err());
    }
}
