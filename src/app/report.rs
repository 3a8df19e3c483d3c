use crate::core::selection::Comparison;
use crate::domain::model::ChartRow;
use crate::utils::error::Result;
use crate::utils::format::{display_name, format_value};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub fn render<W: Write>(comparison: &Comparison, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => {
            out.write_all(render_stats(comparison).as_bytes())?;
            let notices = comparison.notices();
            if !notices.is_empty() {
                writeln!(out)?;
                writeln!(out, "⚠️  Notice")?;
                for notice in notices {
                    writeln!(out, "  {}", notice)?;
                }
            }
            writeln!(out)?;
            out.write_all(render_table(comparison).as_bytes())?;
        }
        OutputFormat::Csv => write_csv(comparison, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &to_json(comparison))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Latest value per selected country, one line each.
pub fn render_stats(comparison: &Comparison) -> String {
    let mut lines = String::new();
    for stat in comparison.stats() {
        let detail = match stat.latest {
            Some(point) => format!("{} ({})", format_value(point.value), point.year),
            None => "loading...".to_string(),
        };
        lines.push_str(&format!(
            "● {:<16} {}  {}\n",
            display_name(&stat.country),
            stat.color,
            detail
        ));
    }
    lines
}

/// Year-by-country grid; `-` marks a missing observation.
pub fn render_table(comparison: &Comparison) -> String {
    let rows = comparison.chart_rows();
    if rows.is_empty() {
        return "No GDP data loaded yet.\n".to_string();
    }

    let selected = comparison.selected();
    let mut header = vec!["Year".to_string()];
    header.extend(selected.iter().map(|c| display_name(c)));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.year.to_string()];
            cells.extend(selected.iter().map(|country| {
                row.value_for(country)
                    .map(format_value)
                    .unwrap_or_else(|| "-".to_string())
            }));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut table = format_line(&header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(&format!("{}\n", rule.join("-+-")));
    for cells in &body {
        table.push_str(&format_line(cells));
    }
    table
}

/// Raw values, one column per selected country, empty cells for gaps.
pub fn write_csv<W: Write>(comparison: &Comparison, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let selected = comparison.selected();

    let mut header = vec!["year".to_string()];
    header.extend(selected.iter().cloned());
    writer.write_record(&header)?;

    for row in comparison.chart_rows() {
        let mut record = vec![row.year.to_string()];
        record.extend(
            selected
                .iter()
                .map(|country| row.value_for(country).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Flat `{ "year": 2020, "<country>": value, ... }` object per row, the shape
/// line-chart widgets consume directly.
pub fn row_to_json(row: &ChartRow) -> Value {
    let mut object = Map::new();
    object.insert("year".to_string(), json!(row.year));
    for (country, value) in &row.values {
        object.insert(country.clone(), json!(value));
    }
    Value::Object(object)
}

pub fn to_json(comparison: &Comparison) -> Value {
    let countries: Vec<Value> = comparison
        .stats()
        .into_iter()
        .map(|stat| {
            json!({
                "name": stat.country,
                "label": display_name(&stat.country),
                "color": stat.color,
                "latest": stat.latest,
            })
        })
        .collect();

    json!({
        "countries": countries,
        "loading": comparison.is_loading(),
        "notices": comparison.notices(),
        "rows": comparison.chart_rows().iter().map(row_to_json).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DataOrigin, FetchOutcome, SeriesPoint};

    fn comparison() -> Comparison {
        let mut comparison = Comparison::new(&["a", "b"]).unwrap();
        comparison.apply(FetchOutcome {
            country: "a".to_string(),
            series: vec![SeriesPoint::new(2020, 100.0)],
            origin: DataOrigin::Live {
                endpoint: "test".to_string(),
            },
        });
        comparison.apply(FetchOutcome {
            country: "b".to_string(),
            series: vec![SeriesPoint::new(2020, 200.0), SeriesPoint::new(2021, 2.5e12)],
            origin: DataOrigin::Fallback {
                reason: "offline".to_string(),
            },
        });
        comparison
    }

    #[test]
    fn test_csv_leaves_gaps_empty() {
        let mut out = Vec::new();
        write_csv(&comparison(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "year,a,b\n2020,100,200\n2021,,2500000000000\n");
    }

    #[test]
    fn test_table_marks_missing_values() {
        let table = render_table(&comparison());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Year") && lines[0].contains('A') && lines[0].contains('B'));
        assert!(lines[2].contains("$100.00") && lines[2].contains("$200.00"));
        assert!(lines[3].contains("$2.5T"));
        assert!(lines[3].contains(" - "));
    }

    #[test]
    fn test_table_without_data() {
        let empty = Comparison::new(&["a"]).unwrap();
        assert_eq!(render_table(&empty), "No GDP data loaded yet.\n");
        assert!(render_stats(&empty).contains("loading..."));
    }

    #[test]
    fn test_json_rows_are_flat_objects() {
        let value = to_json(&comparison());

        assert_eq!(value["rows"][0], json!({"year": 2020, "a": 100.0, "b": 200.0}));
        assert_eq!(value["rows"][1], json!({"year": 2021, "b": 2.5e12}));
        assert_eq!(value["countries"][1]["color"], "#ef4444");
        assert_eq!(value["notices"][0], "Using demonstration data for b: offline");
        assert_eq!(value["loading"], false);
    }

    #[test]
    fn test_render_table_format_includes_notice() {
        let mut out = Vec::new();
        render(&comparison(), OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Notice"));
        assert!(text.contains("Using demonstration data for b"));
        assert!(text.contains("$2.5T (2021)"));
    }
}
