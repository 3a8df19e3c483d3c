use crate::core::selection::Comparison;
use crate::domain::model::{country_key, FetchOutcome};
use crate::domain::ports::GdpSource;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Drives fetches for a [`Comparison`]. Fetches run concurrently and are
/// applied in completion order; nothing is cancelled.
pub struct CompareEngine<S: GdpSource + 'static> {
    source: Arc<S>,
    in_flight: JoinSet<FetchOutcome>,
}

impl<S: GdpSource + 'static> CompareEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            in_flight: JoinSet::new(),
        }
    }

    /// Starts a fetch without waiting for it.
    pub fn request(&mut self, comparison: &mut Comparison, country: &str) {
        let country = country_key(country);
        comparison.begin_fetch(&country);

        let source = Arc::clone(&self.source);
        self.in_flight
            .spawn(async move { source.fetch(&country).await });
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Waits for every started fetch and applies the results. Returns how
    /// many were applied.
    pub async fn settle(&mut self, comparison: &mut Comparison) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.in_flight.join_next().await {
            match joined {
                Ok(outcome) => {
                    tracing::debug!(
                        "Fetch finished for {} ({} points)",
                        outcome.country,
                        outcome.series.len()
                    );
                    comparison.apply(outcome);
                    applied += 1;
                }
                Err(e) => tracing::error!("❌ GDP fetch task failed: {}", e),
            }
        }

        // Anything still pending lost its task.
        let orphaned: Vec<String> = comparison.pending().map(str::to_string).collect();
        for country in orphaned {
            comparison.abandon_fetch(&country, "the fetch task stopped unexpectedly");
        }
        applied
    }

    /// Fetches every selected country and waits for all of them.
    pub async fn load_selection(&mut self, comparison: &mut Comparison) -> usize {
        tracing::info!("🚀 Loading GDP data for {} countries", comparison.selected().len());
        let selected = comparison.selected().to_vec();
        for country in &selected {
            self.request(comparison, country);
        }
        self.settle(comparison).await
    }

    /// Adds a country and starts its fetch. Rejected additions start nothing.
    pub fn add_country(&mut self, comparison: &mut Comparison, name: &str) -> Result<String> {
        let key = comparison.add_country(name)?;
        self.request(comparison, &key);
        Ok(key)
    }

    pub fn remove_country(&mut self, comparison: &mut Comparison, name: &str) -> Result<()> {
        comparison.remove_country(name)?;
        Ok(())
    }
}
