use crate::utils::validation::ViolationList;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Price validation failed: {0}")]
    Violations(ViolationList),

    #[error("Price payload is not valid JSON: {message}")]
    InvalidPayload { message: String },

    #[error("Stored price data is malformed: {message}")]
    MalformedStoredData { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl CodecError {
    pub fn malformed(message: impl Into<String>) -> Self {
        CodecError::MalformedStoredData {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CodecError::Violations(_) | CodecError::InvalidPayload { .. } => {
                ErrorCategory::Validation
            }
            CodecError::MalformedStoredData { .. } | CodecError::SerializationError(_) => {
                ErrorCategory::Data
            }
            CodecError::ConfigError { .. } | CodecError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CodecError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CodecError::Violations(_) => {
                "Fix the listed price fields and make sure the default currency has a price"
            }
            CodecError::InvalidPayload { .. } => "Fix the JSON syntax of the price input",
            CodecError::MalformedStoredData { .. } | CodecError::SerializationError(_) => {
                "The stored price column is corrupted; restore it from a backup or rewrite the prices"
            }
            CodecError::IoError(_) => "Check that the input file exists and the output path is writable",
            CodecError::ConfigError { .. } | CodecError::InvalidConfigValueError { .. } => {
                "Check the [codec] section of the configuration file and the command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CodecError::Violations(list) => {
                format!("{} price violation(s) found", list.len())
            }
            CodecError::MalformedStoredData { message } => {
                format!("Could not read stored prices: {}", message)
            }
            other => other.to_string(),
        }
    }

    /// Violations carried by this error, if it is a validation failure.
    pub fn violations(&self) -> Option<&ViolationList> {
        match self {
            CodecError::Violations(list) => Some(list),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
