use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgeStatsError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Parsing error: {message}")]
    ParsingError { message: String },

    #[error("Calculation error: {message}")]
    CalculationError { message: String },

    #[error("File operation error: {message}")]
    FileOperationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Parsing,
    Calculation,
    FileOperation,
    Configuration,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgeStatsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::ParsingError {
            message: message.into(),
        }
    }

    pub fn calculation(message: impl Into<String>) -> Self {
        Self::CalculationError {
            message: message.into(),
        }
    }

    pub fn file_operation(message: impl Into<String>) -> Self {
        Self::FileOperationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ParsingError { .. } => ErrorCategory::Parsing,
            Self::CalculationError { .. } => ErrorCategory::Calculation,
            Self::FileOperationError { .. } | Self::IoError(_) => ErrorCategory::FileOperation,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Unexpected,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Parsing => ErrorSeverity::Medium,
            ErrorCategory::Calculation
            | ErrorCategory::Configuration
            | ErrorCategory::FileOperation => ErrorSeverity::High,
            ErrorCategory::Unexpected => ErrorSeverity::Critical,
        }
    }

    /// Text of the error without the category prefix used by `Display`.
    pub fn detail(&self) -> String {
        match self {
            Self::ValidationError { message }
            | Self::ParsingError { message }
            | Self::CalculationError { message }
            | Self::FileOperationError { message }
            | Self::ConfigError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Message carried by an error result envelope.
    pub fn envelope_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Validation failed: {}", self.detail()),
            ErrorCategory::Parsing => format!("Failed to parse input data: {}", self.detail()),
            ErrorCategory::Calculation => {
                format!("Failed to calculate statistics: {}", self.detail())
            }
            ErrorCategory::FileOperation => format!("File operation failed: {}", self.detail()),
            ErrorCategory::Configuration | ErrorCategory::Unexpected => {
                format!("Unexpected error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Check that every input holds integer ages (0-150) as [{\"age\": n}] or {\"ages\": [n]}"
            }
            ErrorCategory::Parsing => "Make sure every input file is well-formed JSON",
            ErrorCategory::Calculation => "Re-run the job; if it persists, report the input data",
            ErrorCategory::FileOperation => {
                "Check that input files exist and the output directory is writable"
            }
            ErrorCategory::Configuration => {
                "Review config.toml, AGE_STATS_* environment variables and CLI flags"
            }
            ErrorCategory::Unexpected => "Run again with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self.detail()),
            _ => self.envelope_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgeStatsError>;
