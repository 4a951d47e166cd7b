pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, AppConfig};
pub use crate::core::{etl::EtlEngine, pipeline::AgePipeline};
pub use crate::domain::model::{AgeStatistics, ResultEnvelope, RunStatus};
pub use crate::utils::error::{AgeStatsError, Result};
