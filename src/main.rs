use clap::Parser;
use gdp_compare::app::report;
use gdp_compare::config::cli::{Command, CompareArgs};
use gdp_compare::core::fallback::has_static_data;
use gdp_compare::core::selection::{Comparison, AVAILABLE_COUNTRIES};
use gdp_compare::domain::ports::GdpSource;
use gdp_compare::utils::error::ErrorSeverity;
use gdp_compare::utils::{logger, validation::Validate};
use gdp_compare::{
    Cli, CompareEngine, FallbackData, GdpError, OfflineSource, TomlConfig, TradingEconomicsSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    let verbose = cli.verbose || config.logging.verbose;
    if cli.log_json || config.logging.json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    if let Some(Command::Countries) = cli.command {
        print_countries();
        return Ok(());
    }

    let args = cli.compare_args();
    args.apply_overrides(&mut config);
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config, &args).await {
        tracing::error!(
            "❌ Comparison failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        if e.is_retryable() {
            eprintln!("🔁 This looks temporary; running again may succeed");
        }

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: TomlConfig, args: &CompareArgs) -> gdp_compare::Result<()> {
    let comparison = Comparison::new(&config.compare.countries)?;
    let fallback = FallbackData::new(config.compare.seed);

    let comparison = if config.compare.offline {
        tracing::info!("📴 Offline mode, using demonstration data only");
        compare(CompareEngine::new(OfflineSource::new(fallback)), comparison, args).await
    } else {
        let source = TradingEconomicsSource::new(config.source.clone(), fallback)?;
        compare(CompareEngine::new(source), comparison, args).await
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&comparison, config.compare.format, &mut out)
}

/// Initial fetches, then additions, then removals, then wait for everything.
async fn compare<S: GdpSource + 'static>(
    mut engine: CompareEngine<S>,
    mut comparison: Comparison,
    args: &CompareArgs,
) -> Comparison {
    let initial = comparison.selected().to_vec();
    for country in &initial {
        engine.request(&mut comparison, country);
    }

    for name in &args.add {
        if let Err(e) = engine.add_country(&mut comparison, name) {
            warn_rejected(&e);
        }
    }
    for name in &args.remove {
        if let Err(e) = engine.remove_country(&mut comparison, name) {
            warn_rejected(&e);
        }
    }

    let applied = engine.settle(&mut comparison).await;
    tracing::info!("✅ Applied {} GDP series", applied);
    comparison
}

fn warn_rejected(e: &GdpError) {
    tracing::warn!("Selection change rejected: {}", e);
    eprintln!("⚠️  {} ({})", e.user_friendly_message(), e.recovery_suggestion());
}

fn print_countries() {
    println!("Available countries:");
    for country in AVAILABLE_COUNTRIES {
        if has_static_data(country) {
            println!("  {}", country);
        } else {
            println!("  {:<16} (synthetic demonstration data)", country);
        }
    }
}
