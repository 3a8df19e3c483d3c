use crate::app::report::OutputFormat;
use crate::config::SourceSettings;
use crate::core::selection::{DEFAULT_COUNTRIES, MAX_COUNTRIES};
use crate::utils::error::{GdpError, Result};
use crate::utils::validation::{validate_country_list, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File form of the configuration. Every section is optional; `${VAR}`
/// references are replaced from the environment before parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceSettings,
    pub compare: CompareConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub countries: Vec<String>,
    pub format: OutputFormat,
    /// Seed for synthetic fallback series.
    pub seed: Option<u64>,
    pub offline: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            format: OutputFormat::default(),
            seed: None,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GdpError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| GdpError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            GdpError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.source.validate()?;
        validate_country_list("compare.countries", &self.compare.countries, MAX_COUNTRIES)
    }
}
