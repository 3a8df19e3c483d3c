use crate::domain::model::{ChartRow, SeriesCollection};
use std::collections::BTreeSet;

/// Builds one row per year across the collection, holding the values of the
/// selected countries only. Rows left without any value are dropped, so every
/// returned row has at least one entry and years are strictly ascending.
pub fn merge_for_display(collection: &SeriesCollection, selection: &[String]) -> Vec<ChartRow> {
    let years: BTreeSet<i32> = collection
        .values()
        .flat_map(|series| series.iter().map(|point| point.year))
        .collect();

    years
        .into_iter()
        .filter_map(|year| {
            let values: Vec<(String, f64)> = selection
                .iter()
                .filter_map(|country| {
                    collection
                        .get(country)?
                        .iter()
                        .find(|point| point.year == year)
                        .map(|point| (country.clone(), point.value))
                })
                .collect();

            (!values.is_empty()).then_some(ChartRow { year, values })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SeriesPoint;

    fn series(points: &[(i32, f64)]) -> Vec<SeriesPoint> {
        points.iter().map(|&(y, v)| SeriesPoint::new(y, v)).collect()
    }

    fn collection<const N: usize>(entries: [(&str, Vec<SeriesPoint>); N]) -> SeriesCollection {
        entries
            .into_iter()
            .map(|(name, points)| (name.to_string(), points))
            .collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merges_overlapping_years() {
        let data = collection([
            ("a", series(&[(2020, 100.0)])),
            ("b", series(&[(2020, 200.0), (2021, 210.0)])),
        ]);

        let rows = merge_for_display(&data, &names(&["a", "b"]));

        assert_eq!(
            rows,
            vec![
                ChartRow {
                    year: 2020,
                    values: vec![("a".to_string(), 100.0), ("b".to_string(), 200.0)],
                },
                ChartRow {
                    year: 2021,
                    values: vec![("b".to_string(), 210.0)],
                },
            ]
        );
    }

    #[test]
    fn test_unselected_countries_never_appear() {
        let data = collection([
            ("a", series(&[(2020, 1.0)])),
            ("ghost", series(&[(2019, 5.0), (2020, 6.0)])),
        ]);

        let rows = merge_for_display(&data, &names(&["a"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].value_for("ghost"), None);
    }

    #[test]
    fn test_rows_follow_selection_order() {
        let data = collection([("a", series(&[(2020, 1.0)])), ("b", series(&[(2020, 2.0)]))]);

        let rows = merge_for_display(&data, &names(&["b", "a"]));
        assert_eq!(rows[0].values[0].0, "b");
        assert_eq!(rows[0].values[1].0, "a");
    }

    #[test]
    fn test_years_strictly_ascending_and_rows_non_empty() {
        let data = collection([
            ("a", series(&[(2015, 1.0), (2018, 2.0), (2023, 3.0)])),
            ("b", series(&[(2016, 1.0), (2018, 2.0)])),
        ]);

        let rows = merge_for_display(&data, &names(&["a", "b"]));

        assert!(rows.windows(2).all(|w| w[0].year < w[1].year));
        assert!(rows.iter().all(|row| !row.values.is_empty()));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_selected_country_without_series_is_skipped() {
        let data = collection([("a", series(&[(2020, 1.0)]))]);
        let rows = merge_for_display(&data, &names(&["a", "pending"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values.len(), 1);
    }

    #[test]
    fn test_empty_collection() {
        assert!(merge_for_display(&SeriesCollection::new(), &names(&["a"])).is_empty());
    }
}
