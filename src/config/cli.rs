use crate::app::report::OutputFormat;
use crate::config::toml_config::TomlConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gdp-compare")]
#[command(version, about = "Compare the GDP of up to four countries over the last decade")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch GDP series and print the comparison (default)
    Compare(CompareArgs),
    /// List the countries that can be added to a comparison
    Countries,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CompareArgs {
    /// Countries to start with, comma separated or repeated
    #[arg(value_delimiter = ',', value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Add a country after the initial selection (repeatable)
    #[arg(long = "add", value_name = "COUNTRY")]
    pub add: Vec<String>,

    /// Remove a country after additions are applied (repeatable)
    #[arg(long = "remove", value_name = "COUNTRY")]
    pub remove: Vec<String>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip the network and use demonstration data
    #[arg(long)]
    pub offline: bool,

    /// Seed for synthetic demonstration series
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub api_key: Option<String>,

    /// Relay prefix; pass an empty string to call the API directly
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Usable points a live response needs to be accepted
    #[arg(long)]
    pub min_points: Option<usize>,
}

impl Cli {
    pub fn compare_args(&self) -> CompareArgs {
        match &self.command {
            Some(Command::Compare(args)) => args.clone(),
            _ => CompareArgs::default(),
        }
    }
}

impl CompareArgs {
    /// Command line values win over the file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if !self.countries.is_empty() {
            config.compare.countries = self.countries.clone();
        }
        if let Some(format) = self.format {
            config.compare.format = format;
        }
        if self.offline {
            config.compare.offline = true;
        }
        if self.seed.is_some() {
            config.compare.seed = self.seed;
        }
        if let Some(key) = &self.api_key {
            config.source.api_key = key.clone();
        }
        if let Some(proxy) = &self.proxy_url {
            config.source.proxy_url = proxy.clone();
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_seconds = timeout;
        }
        if let Some(min_points) = self.min_points {
            config.source.min_points = min_points;
        }
    }
}
