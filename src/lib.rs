pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{OfflineSource, TradingEconomicsSource};
pub use config::{toml_config::TomlConfig, SourceSettings};
pub use core::{engine::CompareEngine, fallback::FallbackData, selection::Comparison};
pub use utils::error::{GdpError, Result, SelectionError};
