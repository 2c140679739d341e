//! HTTP access to the Metlink GTFS API.
//!
//! [`HttpClient`] is the seam every request goes through. [`BasicClient`]
//! talks to the network, [`auth::ApiKey`] decorates any client with the key
//! header, and [`GtfsApi`] turns the four endpoints into typed records.

mod api;
mod basic;
pub mod auth;

pub use api::GtfsApi;
pub use basic::BasicClient;

use crate::error::{FetchError, RequestFailure};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Executes one prepared request. Implementations may decorate the request
/// (see [`auth::ApiKey`]) or answer it without touching the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

/// Issues a single JSON `GET` and decodes the body into `T`.
///
/// Any transport error or non-2xx status is a [`FetchError::RequestFailure`];
/// nothing is retried.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: reqwest::Url,
) -> Result<T, FetchError> {
    let mut req = reqwest::Request::new(reqwest::Method::GET, url.clone());
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let failure = |source: RequestFailure| FetchError::RequestFailure {
        url: url.to_string(),
        source,
    };

    let resp = client
        .execute(req)
        .await
        .map_err(|e| failure(e.into()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(failure(RequestFailure::Status { status, body }));
    }

    let bytes = resp.bytes().await.map_err(|e| failure(e.into()))?;
    debug!(url = %url, bytes = bytes.len(), "Response received");

    serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
