//! Session-scoped memo of the initial routes/trips load.

use crate::error::FetchError;
use crate::fetch::{GtfsApi, HttpClient};
use crate::models::{Route, Trip};
use chrono::{DateTime, Utc};
use tracing::info;

/// Routes and trips as fetched at the start of a session.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub loaded_at: DateTime<Utc>,
}

impl FeedSnapshot {
    pub async fn load<C: HttpClient>(api: &GtfsApi<C>) -> Result<Self, FetchError> {
        let trips = api.fetch_trips().await?;
        let routes = api.fetch_routes().await?;
        Ok(Self {
            routes,
            trips,
            loaded_at: Utc::now(),
        })
    }
}

/// Holds at most one [`FeedSnapshot`] until it is invalidated.
///
/// The cache takes no key: the first [`SessionCache::get_or_load`] fetches,
/// every later call returns the same snapshot. Call
/// [`SessionCache::invalidate`] when the session restarts.
#[derive(Debug, Default)]
pub struct SessionCache {
    snapshot: Option<FeedSnapshot>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub async fn get_or_load<C: HttpClient>(
        &mut self,
        api: &GtfsApi<C>,
    ) -> Result<&FeedSnapshot, FetchError> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => {
                let snapshot = FeedSnapshot::load(api).await?;
                info!(
                    routes = snapshot.routes.len(),
                    trips = snapshot.trips.len(),
                    "Session data loaded"
                );
                snapshot
            }
        };
        Ok(&*self.snapshot.insert(snapshot))
    }

    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            info!("Session data invalidated");
        }
    }
}
