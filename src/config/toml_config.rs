use crate::core::ConfigProvider;
use crate::utils::error::{AgeStatsError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub algorithm: AlgorithmConfig,
    pub data: DataConfig,
    pub statistics: StatisticsConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            name: "age-stats".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Minimum, maximum and average age over JSON inputs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub inputs_dir: String,
    pub input_files: Vec<String>,
    pub allow_empty_inputs: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            inputs_dir: "/data/inputs".to_string(),
            input_files: Vec::new(),
            allow_empty_inputs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub decimal_places: u32,
    pub include_count: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            include_count: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "/data/outputs".to_string(),
            filename: "results.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];
pub const MAX_DECIMAL_PLACES: u32 = 10;

impl AppConfig {
    /// Loads `path` if given, else `./config.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AgeStatsError::ConfigError {
            message: format!(
                "Cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AgeStatsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn output_file(&self) -> PathBuf {
        Path::new(&self.output.dir).join(&self.output.filename)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for AppConfig {
    fn input_files(&self) -> &[String] {
        &self.data.input_files
    }

    fn output_path(&self) -> String {
        self.output_file().to_string_lossy().into_owned()
    }

    fn allow_empty_inputs(&self) -> bool {
        self.data.allow_empty_inputs
    }

    fn decimal_places(&self) -> u32 {
        self.statistics.decimal_places
    }

    fn include_count(&self) -> bool {
        self.statistics.include_count
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("algorithm.name", &self.algorithm.name)?;
        validation::validate_path("output.dir", &self.output.dir)?;
        validation::validate_file_name("output.filename", &self.output.filename)?;
        validation::validate_range(
            "statistics.decimal_places",
            self.statistics.decimal_places,
            0,
            MAX_DECIMAL_PLACES,
        )?;
        validation::validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;

        for (idx, file) in self.data.input_files.iter().enumerate() {
            validation::validate_path(&format!("data.input_files[{}]", idx), file)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.inputs_dir, "/data/inputs");
        assert_eq!(config.output_path(), "/data/outputs/results.json");
        assert_eq!(config.decimal_places(), 2);
        assert!(!config.allow_empty_inputs());
        assert!(!config.include_count());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
[algorithm]
name = "ages"

[statistics]
decimal_places = 1

[output]
dir = "./out"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.algorithm.name, "ages");
        assert_eq!(config.decimal_places(), 1);
        assert_eq!(config.output.filename, "results.json");
        assert_eq!(config.output_file(), Path::new("./out").join("results.json"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AGE_STATS_TEST_OUTPUT_DIR", "/tmp/age-out");

        let toml_content = r#"
[output]
dir = "${AGE_STATS_TEST_OUTPUT_DIR}"
filename = "${AGE_STATS_TEST_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.dir, "/tmp/age-out");
        assert_eq!(config.output.filename, "${AGE_STATS_TEST_UNSET_VARIABLE}");

        std::env::remove_var("AGE_STATS_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[statistics\ndecimal_places = 1").unwrap_err();
        assert!(err.to_string().contains("TOML parsing error"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.statistics.decimal_places = 11;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.output.filename = "../escape.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[data]
input_files = ["a.json", "b.json"]
allow_empty_inputs = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.input_files(), ["a.json", "b.json"]);
        assert!(config.allow_empty_inputs());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Cannot read config file"));
    }
}
