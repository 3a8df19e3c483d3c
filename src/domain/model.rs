use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most recent observations kept per country.
pub const MAX_SERIES_POINTS: usize = 10;

/// One country's GDP observation for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Ascending by year, at most [`MAX_SERIES_POINTS`] entries.
pub type CountrySeries = Vec<SeriesPoint>;

/// Country name (lowercase) to its series.
pub type SeriesCollection = BTreeMap<String, CountrySeries>;

/// Where a fetched series came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    Live { endpoint: String },
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub country: String,
    pub series: CountrySeries,
    pub origin: DataOrigin,
}

/// One year's values across the selected countries, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: i32,
    pub values: Vec<(String, f64)>,
}

impl ChartRow {
    pub fn value_for(&self, country: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == country)
            .map(|(_, value)| *value)
    }
}

/// Latest observation of a selected country, as shown on its stats card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryStat {
    pub country: String,
    pub color: &'static str,
    pub latest: Option<SeriesPoint>,
}

/// Normalizes user input to the collection's key format.
pub fn country_key(name: &str) -> String {
    name.trim().to_lowercase()
}
