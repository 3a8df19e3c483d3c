#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_endpoint_templates, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/raw?url=";
pub const DEFAULT_API_BASE: &str = "https://api.tradingeconomics.com";
pub const DEFAULT_API_KEY: &str = "guest:guest";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 120;

/// Tried in order; `{base}` and `{country}` are substituted per request.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "{base}/historical/country/{country}/indicator/gdp",
    "{base}/historical/country/{country}/indicator/GDP Annual Growth Rate",
    "{base}/country/{country}/gdp",
];

/// Where and how GDP series are fetched. An empty `proxy_url` calls the API
/// directly.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub proxy_url: String,
    pub api_base: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub endpoints: Vec<String>,
    /// Usable points a live response needs before it replaces the fallback.
    pub min_points: usize,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            min_points: 1,
        }
    }
}

// The API key is a credential and stays out of logs.
impl fmt::Debug for SourceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSettings")
            .field("proxy_url", &self.proxy_url)
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("endpoints", &self.endpoints)
            .field("min_points", &self.min_points)
            .finish()
    }
}

impl ConfigProvider for SourceSettings {
    fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn endpoint_templates(&self) -> &[String] {
        &self.endpoints
    }

    fn min_points(&self) -> usize {
        self.min_points
    }
}

impl Validate for SourceSettings {
    fn validate(&self) -> Result<()> {
        if !self.proxy_url.is_empty() {
            validate_url("source.proxy_url", &self.proxy_url)?;
        }
        validate_url("source.api_base", &self.api_base)?;
        validate_non_empty_string("source.api_key", &self.api_key)?;
        validate_range(
            "source.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_endpoint_templates("source.endpoints", &self.endpoints)?;
        validate_range(
            "source.min_points",
            self.min_points,
            1,
            crate::domain::model::MAX_SERIES_POINTS,
        )?;
        Ok(())
    }
}
