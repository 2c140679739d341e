use crate::fetch::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// Header Metlink expects the API key in.
pub const DEFAULT_HEADER: &str = "x-api-key";

/// An [`HttpClient`] wrapper that injects a static API key as an HTTP header.
///
/// The header name and value are parsed once in [`ApiKey::new`], so a
/// malformed key is reported at startup rather than on every request.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid API key header name '{header_name}'"))?;
        let mut key = HeaderValue::from_str(key).context("API key is not a valid header value")?;
        key.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            key,
        })
    }

    /// Wraps `inner` using the `x-api-key` header.
    pub fn metlink(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, DEFAULT_HEADER, key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_rejects_invalid_header_name() {
        assert!(ApiKey::new(BasicClient::new().unwrap(), "bad header", "secret").is_err());
    }

    #[test]
    fn test_rejects_key_with_newline() {
        assert!(ApiKey::metlink(BasicClient::new().unwrap(), "abc\ndef").is_err());
    }

    #[test]
    fn test_accepts_metlink_key() {
        assert!(ApiKey::metlink(BasicClient::new().unwrap(), "test-key").is_ok());
    }
}
