use crate::core::fallback::FallbackData;
use crate::core::normalize::normalize_observations;
use crate::domain::model::{country_key, DataOrigin, FetchOutcome};
use crate::domain::ports::{ConfigProvider, GdpSource};
use crate::utils::error::{GdpError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use url::form_urlencoded;

/// `encodeURIComponent`-style escaping: spaces become `%20`, never `+`.
pub fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Full request URL for one endpoint template. With a proxy the whole API URL
/// (key included) is escaped into the proxy's query string.
pub fn build_request_url<C: ConfigProvider + ?Sized>(
    config: &C,
    template: &str,
    country: &str,
) -> String {
    let endpoint = template
        .replace("{base}", config.api_base().trim_end_matches('/'))
        .replace("{country}", &encode_component(country));
    let api_url = format!("{}?c={}&f=json", endpoint, config.api_key());

    if config.proxy_url().is_empty() {
        api_url
    } else {
        format!("{}{}", config.proxy_url(), encode_component(&api_url))
    }
}

enum Attempt {
    /// A non-empty array arrived; it decides the outcome.
    Decisive(Vec<serde_json::Value>),
    Rejected(GdpError),
}

/// Trading Economics GDP source. Tries each endpoint once, in order, and
/// falls back to demonstration data when none delivers.
pub struct TradingEconomicsSource<C: ConfigProvider> {
    config: C,
    client: Client,
    fallback: FallbackData,
}

impl<C: ConfigProvider> TradingEconomicsSource<C> {
    pub fn new(config: C, fallback: FallbackData) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            config,
            client,
            fallback,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn attempt(&self, url: &str) -> Attempt {
        match self.request(url).await {
            Ok(items) if !items.is_empty() => Attempt::Decisive(items),
            Ok(_) => Attempt::Rejected(GdpError::ResponseError {
                endpoint: url.to_string(),
                reason: "empty array".to_string(),
            }),
            Err(e) => Attempt::Rejected(e),
        }
    }

    async fn request(&self, url: &str) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(GdpError::HttpStatusError {
                endpoint: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<serde_json::Value>(&body)? {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(GdpError::ResponseError {
                endpoint: url.to_string(),
                reason: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    fn fall_back(&self, country: String, reason: String) -> FetchOutcome {
        tracing::warn!("⚠️ Using demonstration data for {}: {}", country, reason);
        FetchOutcome {
            series: self.fallback.series_for(&country),
            country,
            origin: DataOrigin::Fallback { reason },
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl<C: ConfigProvider> GdpSource for TradingEconomicsSource<C> {
    async fn fetch(&self, country: &str) -> FetchOutcome {
        let country = country_key(country);
        let templates = self.config.endpoint_templates();
        let mut last_error = None;

        for template in templates {
            let url = build_request_url(&self.config, template, &country);

            let items = match self.attempt(&url).await {
                Attempt::Decisive(items) => items,
                Attempt::Rejected(e) => {
                    tracing::warn!("Endpoint failed for {}: {} ({})", country, template, e);
                    last_error = Some(e);
                    continue;
                }
            };

            let series = normalize_observations(&items);
            if series.len() < self.config.min_points() {
                let reason = format!(
                    "response had {} usable of {} entries",
                    series.len(),
                    items.len()
                );
                return self.fall_back(country, reason);
            }

            tracing::info!(
                "✅ Loaded {} GDP points for {} ({}..={})",
                series.len(),
                country,
                series.first().map(|p| p.year).unwrap_or_default(),
                series.last().map(|p| p.year).unwrap_or_default()
            );
            return FetchOutcome {
                country,
                series,
                origin: DataOrigin::Live {
                    endpoint: template.clone(),
                },
            };
        }

        let reason = match last_error {
            Some(e) => format!(
                "all {} endpoints failed, last error: {}",
                templates.len(),
                e.user_friendly_message()
            ),
            None => "no endpoints configured".to_string(),
        };
        self.fall_back(country, reason)
    }
}
