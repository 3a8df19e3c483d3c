use crate::domain::model::FetchOutcome;
use async_trait::async_trait;

/// Settings a GDP source needs, whatever the configuration surface.
pub trait ConfigProvider: Send + Sync {
    fn proxy_url(&self) -> &str;
    fn api_base(&self) -> &str;
    fn api_key(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn endpoint_templates(&self) -> &[String];
    fn min_points(&self) -> usize;
}

/// Produces a series for a country. Implementations swallow failures and
/// report them through [`crate::domain::model::DataOrigin::Fallback`].
#[async_trait]
pub trait GdpSource: Send + Sync {
    async fn fetch(&self, country: &str) -> FetchOutcome;
}
