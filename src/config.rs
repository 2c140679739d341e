//! API settings read from the environment (and `.env`, loaded by the binary).

use crate::fetch::auth::DEFAULT_HEADER;
use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.opendata.metlink.org.nz/v1";

pub const API_KEY_VAR: &str = "METLINK_API_KEY";
pub const BASE_URL_VAR: &str = "METLINK_BASE_URL";
pub const API_KEY_HEADER_VAR: &str = "METLINK_API_KEY_HEADER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_key_header: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_key_header: DEFAULT_HEADER.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).with_context(|| format!("{API_KEY_VAR} must be set"))?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(header) = get(API_KEY_HEADER_VAR) {
            config.api_key_header = header;
        }
        Ok(config)
    }
}
