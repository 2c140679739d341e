//! Error types surfaced by the fetch client and the dashboard.

use reqwest::StatusCode;

/// Why a request to the API did not produce a usable response.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    RequestFailure {
        url: String,
        #[source]
        source: RequestFailure,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// HTTP status of a failed request, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::RequestFailure {
                source: RequestFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no route matches '{0}'")]
    UnknownRoute(String),
}
