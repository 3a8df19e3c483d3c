//! View-model for a GDP comparison: which countries are selected, the series
//! loaded for them, fetches still in flight and the notices to show.

use crate::core::merge::merge_for_display;
use crate::domain::model::{
    country_key, ChartRow, CountrySeries, CountryStat, DataOrigin, FetchOutcome, SeriesCollection,
};
use crate::utils::error::SelectionError;
use std::collections::BTreeMap;

pub const MAX_COUNTRIES: usize = 4;

pub const DEFAULT_COUNTRIES: [&str; 2] = ["united states", "china"];

pub const PALETTE: [&str; 5] = ["#3b82f6", "#ef4444", "#22c55e", "#f59e0b", "#8b5cf6"];

pub const AVAILABLE_COUNTRIES: [&str; 29] = [
    "united states",
    "china",
    "japan",
    "germany",
    "india",
    "united kingdom",
    "france",
    "italy",
    "brazil",
    "canada",
    "russia",
    "south korea",
    "spain",
    "australia",
    "mexico",
    "indonesia",
    "netherlands",
    "turkey",
    "taiwan",
    "belgium",
    "argentina",
    "ireland",
    "israel",
    "thailand",
    "nigeria",
    "egypt",
    "south africa",
    "poland",
    "bangladesh",
];

pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone)]
pub struct Comparison {
    selected: Vec<String>,
    series: SeriesCollection,
    /// Fetches in flight per country. A country removed and added again can
    /// have more than one.
    pending: BTreeMap<String, usize>,
    fallback_reasons: BTreeMap<String, String>,
}

impl Comparison {
    /// Starts from `initial`, which must hold 1 to [`MAX_COUNTRIES`] distinct names.
    pub fn new<S: AsRef<str>>(initial: &[S]) -> Result<Self, SelectionError> {
        let mut comparison = Self::empty();
        for name in initial {
            comparison.push_selected(name.as_ref())?;
        }
        if comparison.selected.is_empty() {
            return Err(SelectionError::LastCountry);
        }
        Ok(comparison)
    }

    pub fn with_defaults() -> Self {
        Self {
            selected: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            selected: Vec::new(),
            series: SeriesCollection::new(),
            pending: BTreeMap::new(),
            fallback_reasons: BTreeMap::new(),
        }
    }

    fn push_selected(&mut self, name: &str) -> Result<String, SelectionError> {
        let key = country_key(name);
        if key.is_empty() {
            return Err(SelectionError::EmptyName);
        }
        if self.selected.contains(&key) {
            return Err(SelectionError::AlreadySelected { country: key });
        }
        if self.selected.len() >= MAX_COUNTRIES {
            return Err(SelectionError::LimitReached { max: MAX_COUNTRIES });
        }
        self.selected.push(key.clone());
        Ok(key)
    }

    /// Adds a country and returns its normalized key. The caller is expected
    /// to start a fetch for it.
    pub fn add_country(&mut self, name: &str) -> Result<String, SelectionError> {
        let key = self.push_selected(name)?;
        tracing::debug!("Selected '{}' ({} of {})", key, self.selected.len(), MAX_COUNTRIES);
        Ok(key)
    }

    /// Removes a country along with its series. A fetch still running for it
    /// may write the entry back later, which merge ignores.
    pub fn remove_country(&mut self, name: &str) -> Result<(), SelectionError> {
        let key = country_key(name);
        let position = self
            .selected
            .iter()
            .position(|c| *c == key)
            .ok_or_else(|| SelectionError::NotSelected {
                country: key.clone(),
            })?;
        if self.selected.len() == 1 {
            return Err(SelectionError::LastCountry);
        }

        self.selected.remove(position);
        self.series.remove(&key);
        self.fallback_reasons.remove(&key);
        tracing::debug!("Removed '{}'", key);
        Ok(())
    }

    pub fn begin_fetch(&mut self, country: &str) {
        *self.pending.entry(country_key(country)).or_insert(0) += 1;
    }

    fn finish_fetch(&mut self, key: &str) {
        if let Some(count) = self.pending.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(key);
            }
        }
    }

    /// Records a finished fetch. Last write wins per country.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        let key = country_key(&outcome.country);
        self.finish_fetch(&key);

        match outcome.origin {
            DataOrigin::Fallback { reason } => {
                self.fallback_reasons.insert(key.clone(), reason);
            }
            DataOrigin::Live { .. } => {
                self.fallback_reasons.remove(&key);
            }
        }
        self.series.insert(key, outcome.series);
    }

    /// Gives up on every fetch for `country` that will never report back.
    pub fn abandon_fetch(&mut self, country: &str, reason: &str) {
        let key = country_key(country);
        if self.pending.remove(&key).is_some() {
            self.fallback_reasons.insert(key, reason.to_string());
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn series(&self) -> &SeriesCollection {
        &self.series
    }

    pub fn series_for(&self, country: &str) -> Option<&CountrySeries> {
        self.series.get(&country_key(country))
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.keys().map(String::as_str)
    }

    pub fn can_add(&self) -> bool {
        self.selected.len() < MAX_COUNTRIES
    }

    pub fn can_remove(&self) -> bool {
        self.selected.len() > 1
    }

    /// Countries offered for adding: the known list minus the selection.
    pub fn add_candidates(&self) -> Vec<&'static str> {
        AVAILABLE_COUNTRIES
            .iter()
            .copied()
            .filter(|c| !self.selected.iter().any(|s| s == c))
            .collect()
    }

    pub fn color_for(&self, country: &str) -> Option<&'static str> {
        let key = country_key(country);
        self.selected
            .iter()
            .position(|c| *c == key)
            .map(color_for_index)
    }

    pub fn stats(&self) -> Vec<CountryStat> {
        self.selected
            .iter()
            .enumerate()
            .map(|(index, country)| CountryStat {
                country: country.clone(),
                color: color_for_index(index),
                latest: self.series.get(country).and_then(|s| s.last().copied()),
            })
            .collect()
    }

    /// One message per selected country currently shown with demonstration data.
    pub fn notices(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|country| {
                self.fallback_reasons.get(country).map(|reason| {
                    format!("Using demonstration data for {}: {}", country, reason)
                })
            })
            .collect()
    }

    pub fn chart_rows(&self) -> Vec<ChartRow> {
        merge_for_display(&self.series, &self.selected)
    }
}

impl Default for Comparison {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SeriesPoint;

    fn live(country: &str, points: &[(i32, f64)]) -> FetchOutcome {
        FetchOutcome {
            country: country.to_string(),
            series: points.iter().map(|&(y, v)| SeriesPoint::new(y, v)).collect(),
            origin: DataOrigin::Live {
                endpoint: "test".to_string(),
            },
        }
    }

    fn fallback(country: &str, reason: &str) -> FetchOutcome {
        FetchOutcome {
            country: country.to_string(),
            series: vec![SeriesPoint::new(2015, 1.0)],
            origin: DataOrigin::Fallback {
                reason: reason.to_string(),
            },
        }
    }

    #[test]
    fn test_defaults() {
        let comparison = Comparison::default();
        assert_eq!(comparison.selected(), &["united states", "china"]);
        assert!(!comparison.is_loading());
    }

    #[test]
    fn test_new_rejects_empty_and_oversized_selection() {
        let empty: [&str; 0] = [];
        assert_eq!(Comparison::new(&empty).unwrap_err(), SelectionError::LastCountry);
        assert_eq!(
            Comparison::new(&["a", "b", "c", "d", "e"]).unwrap_err(),
            SelectionError::LimitReached { max: 4 }
        );
    }

    #[test]
    fn test_fifth_country_is_rejected() {
        let mut comparison = Comparison::new(&["a", "b", "c"]).unwrap();
        assert_eq!(comparison.add_country("D").unwrap(), "d");
        assert!(!comparison.can_add());

        let err = comparison.add_country("e").unwrap_err();
        assert_eq!(err, SelectionError::LimitReached { max: 4 });
        assert_eq!(comparison.selected().len(), 4);
    }

    #[test]
    fn test_duplicate_and_empty_names_are_rejected() {
        let mut comparison = Comparison::new(&["japan"]).unwrap();
        assert_eq!(
            comparison.add_country(" Japan ").unwrap_err(),
            SelectionError::AlreadySelected {
                country: "japan".to_string()
            }
        );
        assert_eq!(comparison.add_country("  ").unwrap_err(), SelectionError::EmptyName);
    }

    #[test]
    fn test_last_country_cannot_be_removed() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.remove_country("china").unwrap();
        assert!(!comparison.can_remove());
        assert_eq!(
            comparison.remove_country("japan").unwrap_err(),
            SelectionError::LastCountry
        );
        assert_eq!(
            comparison.remove_country("india").unwrap_err(),
            SelectionError::NotSelected {
                country: "india".to_string()
            }
        );
    }

    #[test]
    fn test_remove_drops_series_and_notice() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.apply(fallback("china", "timeout"));
        assert_eq!(comparison.notices().len(), 1);

        comparison.remove_country("china").unwrap();
        assert!(comparison.series_for("china").is_none());
        assert!(comparison.notices().is_empty());
    }

    #[test]
    fn test_late_fetch_for_removed_country_is_harmless() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.begin_fetch("china");
        comparison.remove_country("china").unwrap();

        comparison.apply(live("japan", &[(2020, 1.0)]));
        comparison.apply(live("china", &[(2019, 9.0), (2020, 2.0)]));

        assert!(!comparison.is_loading());
        let rows = comparison.chart_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values, vec![("japan".to_string(), 1.0)]);
    }

    #[test]
    fn test_readded_country_stays_loading_until_its_own_fetch_lands() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.begin_fetch("china");
        comparison.remove_country("china").unwrap();
        comparison.add_country("china").unwrap();
        comparison.begin_fetch("china");

        comparison.apply(live("china", &[(2019, 9.0)]));
        assert!(comparison.is_loading());
        assert_eq!(comparison.pending().collect::<Vec<_>>(), vec!["china"]);

        comparison.apply(live("china", &[(2020, 2.0), (2021, 3.0)]));
        assert!(!comparison.is_loading());
        assert_eq!(comparison.series_for("china").map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_loading_tracks_pending_fetches() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.begin_fetch("japan");
        comparison.begin_fetch("china");
        assert!(comparison.is_loading());

        comparison.apply(live("japan", &[(2020, 1.0)]));
        assert!(comparison.is_loading());
        assert_eq!(comparison.pending().collect::<Vec<_>>(), vec!["china"]);

        comparison.abandon_fetch("china", "task failed");
        assert!(!comparison.is_loading());
        assert_eq!(
            comparison.notices(),
            vec!["Using demonstration data for china: task failed".to_string()]
        );
    }

    #[test]
    fn test_live_result_clears_previous_notice() {
        let mut comparison = Comparison::new(&["japan"]).unwrap();
        comparison.apply(fallback("japan", "offline"));
        comparison.apply(live("japan", &[(2022, 5.0)]));
        assert!(comparison.notices().is_empty());
    }

    #[test]
    fn test_colors_and_stats_follow_selection_index() {
        let mut comparison = Comparison::new(&["japan", "china"]).unwrap();
        comparison.apply(live("china", &[(2021, 1.0), (2022, 2.0)]));

        assert_eq!(comparison.color_for("japan"), Some("#3b82f6"));
        assert_eq!(comparison.color_for("china"), Some("#ef4444"));
        assert_eq!(comparison.color_for("india"), None);

        let stats = comparison.stats();
        assert_eq!(stats[0].latest, None);
        assert_eq!(stats[1].latest, Some(SeriesPoint::new(2022, 2.0)));
        assert_eq!(stats[1].color, "#ef4444");
    }

    #[test]
    fn test_add_candidates_exclude_selection() {
        let comparison = Comparison::default();
        let candidates = comparison.add_candidates();
        assert_eq!(candidates.len(), AVAILABLE_COUNTRIES.len() - 2);
        assert!(!candidates.contains(&"china"));
        assert!(candidates.contains(&"japan"));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(color_for_index(5), color_for_index(0));
    }
}
