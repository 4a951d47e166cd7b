pub mod cli;
pub mod env;
pub mod job_inputs;
pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "age-stats")]
#[command(about = "Computes min / max / average age over JSON input files")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding job inputs
    #[arg(long)]
    pub inputs_dir: Option<String>,

    /// Explicit input files, processed in the given order
    #[arg(long = "input", value_delimiter = ',')]
    pub inputs: Vec<String>,

    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub output_filename: Option<String>,

    /// Digits kept on avg_age
    #[arg(long)]
    pub decimal_places: Option<u32>,

    /// Report zero statistics instead of an error when there are no inputs
    #[arg(long)]
    pub allow_empty_inputs: Option<bool>,

    /// Add the number of ages to the result file
    #[arg(long)]
    pub include_count: Option<bool>,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Show what would be processed without writing results
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then TOML, then `AGE_STATS_*`, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        env::apply_env_overrides(&mut config)?;
        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.inputs_dir {
            config.data.inputs_dir = dir.clone();
        }
        if !self.inputs.is_empty() {
            config.data.input_files = self.inputs.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(name) = &self.output_filename {
            config.output.filename = name.clone();
        }
        if let Some(places) = self.decimal_places {
            config.statistics.decimal_places = places;
        }
        if let Some(allow) = self.allow_empty_inputs {
            config.data.allow_empty_inputs = allow;
        }
        if let Some(include) = self.include_count {
            config.statistics.include_count = include;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
    }
}
