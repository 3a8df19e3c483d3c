//! Demonstration data served when live GDP figures are unavailable.
//!
//! Four countries have a fixed table (USD, 2015-2023). Every other country gets
//! a synthetic series: a random base in `[0, 5e12)` jittered by up to 5% per
//! year, so the chart still has something plausible to draw.

use crate::domain::model::{CountrySeries, SeriesPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const FIRST_FALLBACK_YEAR: i32 = 2015;
pub const FALLBACK_YEARS: usize = 9;

const SYNTHETIC_BASE_MAX: f64 = 5_000_000_000_000.0;
const SYNTHETIC_JITTER: f64 = 0.05;

const UNITED_STATES: [f64; FALLBACK_YEARS] = [
    18_036_648_000_000.0,
    18_624_475_000_000.0,
    19_485_394_000_000.0,
    20_544_343_000_000.0,
    21_374_419_000_000.0,
    20_953_030_000_000.0,
    23_315_080_000_000.0,
    25_462_700_000_000.0,
    26_854_599_000_000.0,
];

const CHINA: [f64; FALLBACK_YEARS] = [
    11_061_552_000_000.0,
    11_233_281_000_000.0,
    12_310_410_000_000.0,
    13_608_152_000_000.0,
    14_342_903_000_000.0,
    14_722_731_000_000.0,
    17_734_063_000_000.0,
    17_963_171_000_000.0,
    17_700_899_000_000.0,
];

const JAPAN: [f64; FALLBACK_YEARS] = [
    4_444_931_000_000.0,
    4_968_239_000_000.0,
    4_940_159_000_000.0,
    4_971_323_000_000.0,
    5_081_770_000_000.0,
    4_975_415_000_000.0,
    4_940_878_000_000.0,
    4_301_621_000_000.0,
    4_212_945_000_000.0,
];

const GERMANY: [f64; FALLBACK_YEARS] = [
    3_365_293_000_000.0,
    3_495_000_000_000.0,
    3_685_556_000_000.0,
    3_947_620_000_000.0,
    3_861_124_000_000.0,
    3_846_414_000_000.0,
    4_259_935_000_000.0,
    4_259_935_000_000.0,
    4_121_474_000_000.0,
];

fn static_table(country: &str) -> Option<&'static [f64; FALLBACK_YEARS]> {
    match country {
        "united states" => Some(&UNITED_STATES),
        "china" => Some(&CHINA),
        "japan" => Some(&JAPAN),
        "germany" => Some(&GERMANY),
        _ => None,
    }
}

/// Countries answered from the fixed table rather than synthesized.
pub fn has_static_data(country: &str) -> bool {
    static_table(country).is_some()
}

fn series_from_values(values: impl IntoIterator<Item = f64>) -> CountrySeries {
    values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| SeriesPoint::new(FIRST_FALLBACK_YEAR + offset as i32, value))
        .collect()
}

/// Source of fallback series. Synthetic values come from a shared RNG that can
/// be seeded for reproducible output.
#[derive(Debug)]
pub struct FallbackData {
    rng: Mutex<StdRng>,
}

impl FallbackData {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed
            .map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn series_for(&self, country: &str) -> CountrySeries {
        if let Some(values) = static_table(country) {
            return series_from_values(values.iter().copied());
        }

        tracing::debug!("No static GDP table for '{}', synthesizing one", country);
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        synthetic_series(&mut *rng)
    }
}

impl Default for FallbackData {
    fn default() -> Self {
        Self::new(None)
    }
}

pub fn synthetic_series<R: Rng + ?Sized>(rng: &mut R) -> CountrySeries {
    let base = rng.gen_range(0.0..SYNTHETIC_BASE_MAX);
    let values: Vec<f64> = (0..FALLBACK_YEARS)
        .map(|_| base * (1.0 + rng.gen_range(-SYNTHETIC_JITTER..SYNTHETIC_JITTER)))
        .collect();
    series_from_values(values)
}
