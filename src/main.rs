use age_stats::config::job_inputs;
use age_stats::utils::error::{ErrorCategory, ErrorSeverity};
use age_stats::utils::logger::{self, LogFormat};
use age_stats::utils::validation::Validate;
use age_stats::{AgePipeline, AppConfig, CliConfig, EtlEngine, LocalStorage};
use anyhow::Context;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let mut config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let format = LogFormat::parse(&config.logging.format).unwrap_or(LogFormat::Compact);
    logger::init_logger(&config.logging.level, format, args.verbose);

    tracing::info!(
        "🚀 Starting {} v{}",
        config.algorithm.name,
        config.algorithm.version
    );
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let dids = job_inputs::dids_from_env().context("reading dataset ids")?;
    // an unreadable inputs tree is reported through the result file
    let discovery_error = match job_inputs::discover_inputs(
        &config.data.inputs_dir,
        &config.data.input_files,
        dids.as_deref(),
    ) {
        Ok(files) => {
            config.data.input_files = files;
            None
        }
        Err(e) if e.category() == ErrorCategory::Configuration => {
            return Err(e).context("discovering job inputs");
        }
        Err(e) => Some(e),
    };

    display_config_summary(&config, &args);

    if args.dry_run {
        if let Some(e) = &discovery_error {
            println!("⚠️ {}", e.envelope_message());
        }
        tracing::info!("🔍 DRY RUN MODE - No results will be written");
        return Ok(());
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = AgePipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let result = match &discovery_error {
        Some(e) => engine.report_failure(e).await,
        None => engine.run().await,
    };

    match result {
        Ok(outcome) => {
            if outcome.envelope.is_success() {
                println!("✅ {}", outcome.envelope.message);
            } else {
                println!("⚠️ {}", outcome.envelope.message);
            }
            println!("📁 Output saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Could not write results: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &AppConfig, args: &CliConfig) {
    println!("📋 Configuration Summary:");
    println!(
        "  Algorithm: {} v{}",
        config.algorithm.name, config.algorithm.version
    );
    println!("  Inputs: {} file(s)", config.data.input_files.len());
    if args.verbose || args.dry_run {
        for (idx, file) in config.data.input_files.iter().enumerate() {
            println!("    [{}] {}", idx, file);
        }
    }
    println!("  Allow empty inputs: {}", config.data.allow_empty_inputs);
    println!("  Decimal places: {}", config.statistics.decimal_places);
    println!("  Output: {}", config.output_file().display());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
