use crate::config::toml_config::AppConfig;
use crate::utils::error::{AgeStatsError, Result};
use std::str::FromStr;

pub const ENV_PREFIX: &str = "AGE_STATS_";

/// Applies `AGE_STATS_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Same as [`apply_env_overrides`] with an injectable lookup.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| {
        let key = format!("{}{}", ENV_PREFIX, name);
        lookup(&key).map(|value| (key, value))
    };

    if let Some((_, value)) = get("INPUTS_DIR") {
        config.data.inputs_dir = value;
    }
    if let Some((_, value)) = get("INPUT_FILES") {
        config.data.input_files = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some((key, value)) = get("ALLOW_EMPTY_INPUTS") {
        config.data.allow_empty_inputs = parse_bool(&key, &value)?;
    }
    if let Some((key, value)) = get("DECIMAL_PLACES") {
        config.statistics.decimal_places = parse_value(&key, &value)?;
    }
    if let Some((key, value)) = get("INCLUDE_COUNT") {
        config.statistics.include_count = parse_bool(&key, &value)?;
    }
    if let Some((_, value)) = get("OUTPUT_DIR") {
        config.output.dir = value;
    }
    if let Some((_, value)) = get("OUTPUT_FILENAME") {
        config.output.filename = value;
    }
    if let Some((_, value)) = get("LOG_LEVEL") {
        config.logging.level = value.to_ascii_lowercase();
    }
    if let Some((_, value)) = get("LOG_FORMAT") {
        config.logging.format = value.to_ascii_lowercase();
    }
    if let Some((key, value)) = get("MONITOR") {
        config.monitoring.enabled = parse_bool(&key, &value)?;
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AgeStatsError::InvalidConfigValueError {
            field: key.to_string(),
            value: value.to_string(),
            reason: "Expected a boolean (true/false, 1/0, yes/no, on/off)".to_string(),
        }),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| AgeStatsError::InvalidConfigValueError {
            field: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
