use crate::domain::model::{CountrySeries, SeriesPoint, MAX_SERIES_POINTS};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// Fields we read from one historical observation. Everything else the API
/// sends (Country, Category, Frequency, ...) is ignored.
#[derive(Debug, Deserialize)]
struct RawObservation {
    #[serde(rename = "Value", default)]
    value: Option<Value>,
    #[serde(rename = "DateTime", default)]
    date_time: Option<String>,
}

/// Turns a raw API array into a country series: drops entries without a
/// usable value or date, sorts ascending by year and keeps the last
/// [`MAX_SERIES_POINTS`].
pub fn normalize_observations(items: &[Value]) -> CountrySeries {
    let mut points: Vec<SeriesPoint> = items
        .iter()
        .filter_map(|item| serde_json::from_value::<RawObservation>(item.clone()).ok())
        .filter_map(|raw| {
            let value = raw.value.as_ref().and_then(numeric_value)?;
            let year = raw.date_time.as_deref().and_then(year_of)?;
            Some(SeriesPoint::new(year, value))
        })
        .collect();

    // Stable, so same-year entries keep the order the API sent them in.
    points.sort_by_key(|point| point.year);

    let skip = points.len().saturating_sub(MAX_SERIES_POINTS);
    points.drain(..skip);
    points
}

fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Accepts RFC 3339, the API's zone-less `2023-12-31T00:00:00`, or a bare date.
fn year_of(timestamp: &str) -> Option<i32> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.year());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn observation(date: &str, value: f64) -> Value {
        json!({
            "Country": "Japan",
            "Category": "GDP",
            "DateTime": date,
            "Value": value,
            "Frequency": "Yearly"
        })
    }

    #[test]
    fn test_sorts_ascending_by_year() {
        let items = vec![
            observation("2022-12-31T00:00:00", 3.0),
            observation("2020-12-31T00:00:00", 1.0),
            observation("2021-12-31T00:00:00", 2.0),
        ];

        let series = normalize_observations(&items);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        assert_eq!(series[2].value, 3.0);
    }

    #[test]
    fn test_keeps_only_last_ten_years() {
        let items: Vec<Value> = (2000..2015)
            .map(|year| observation(&format!("{}-12-31T00:00:00", year), year as f64))
            .collect();

        let series = normalize_observations(&items);
        assert_eq!(series.len(), MAX_SERIES_POINTS);
        assert_eq!(series.first().unwrap().year, 2005);
        assert_eq!(series.last().unwrap().year, 2014);
    }

    #[test]
    fn test_drops_entries_without_value_or_date() {
        let items = vec![
            json!({"DateTime": "2019-12-31T00:00:00", "Value": null}),
            json!({"Value": 5.0}),
            json!({"DateTime": "not a date", "Value": 5.0}),
            json!({"DateTime": "2020-12-31T00:00:00", "Value": "4231.1"}),
            json!({"DateTime": "2021-12-31T00:00:00", "Value": "n/a"}),
            json!("garbage"),
            observation("2022-12-31T00:00:00", 4300.0),
        ];

        let series = normalize_observations(&items);
        assert_eq!(
            series,
            vec![SeriesPoint::new(2020, 4231.1), SeriesPoint::new(2022, 4300.0)]
        );
    }

    #[test]
    fn test_accepts_rfc3339_and_plain_dates() {
        let items = vec![
            json!({"DateTime": "2018-06-30T00:00:00Z", "Value": 1}),
            json!({"DateTime": "2019-06-30", "Value": 2}),
        ];

        let series = normalize_observations(&items);
        assert_eq!(series.iter().map(|p| p.year).collect::<Vec<_>>(), vec![2018, 2019]);
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        assert!(normalize_observations(&[]).is_empty());
    }
}
