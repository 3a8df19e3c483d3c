use crate::core::fallback::FallbackData;
use crate::domain::model::{country_key, DataOrigin, FetchOutcome};
use crate::domain::ports::GdpSource;
use async_trait::async_trait;

/// Serves demonstration data without touching the network.
#[derive(Debug, Default)]
pub struct OfflineSource {
    fallback: FallbackData,
}

impl OfflineSource {
    pub fn new(fallback: FallbackData) -> Self {
        Self { fallback }
    }
}

#[async_trait]
impl GdpSource for OfflineSource {
    async fn fetch(&self, country: &str) -> FetchOutcome {
        let country = country_key(country);
        tracing::debug!("Offline mode, serving demonstration data for {}", country);
        FetchOutcome {
            series: self.fallback.series_for(&country),
            country,
            origin: DataOrigin::Fallback {
                reason: "offline mode".to_string(),
            },
        }
    }
}
