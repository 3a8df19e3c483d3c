use crate::utils::error::{GdpError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GdpError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GdpError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GdpError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GdpError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GdpError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Every template must carry the `{country}` placeholder.
pub fn validate_endpoint_templates(field_name: &str, templates: &[String]) -> Result<()> {
    if templates.is_empty() {
        return Err(GdpError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    for template in templates {
        if !template.contains("{country}") {
            return Err(GdpError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: template.clone(),
                reason: "Endpoint template must contain {country}".to_string(),
            });
        }
    }
    Ok(())
}

/// Initial selections obey the same bounds as the interactive ones.
pub fn validate_country_list(field_name: &str, countries: &[String], max: usize) -> Result<()> {
    validate_range(field_name, countries.len(), 1, max)?;

    let mut seen = HashSet::new();
    for country in countries {
        validate_non_empty_string(field_name, country)?;
        if !seen.insert(country.trim().to_lowercase()) {
            return Err(GdpError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: country.clone(),
                reason: "Duplicate country".to_string(),
            });
        }
    }
    Ok(())
}
