/// Compact currency label used by the stats cards and the table axis.
pub fn format_value(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.1}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else {
        format!("${:.2}", value)
    }
}

/// Uppercases only the first character: "united states" -> "United states".
pub fn display_name(country: &str) -> String {
    let mut chars = country.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
