use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagraformError {
    #[error("Malformed snapshot {source_name}: {message}")]
    MalformedSnapshot {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiagraformError {
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedSnapshot { .. } => ErrorCategory::Input,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedSnapshot { .. } => ErrorSeverity::High,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedSnapshot { .. } => {
                "Export the state with `terraform show -json` and pass that file"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            Self::MissingConfigError { .. } => "Add the missing setting to the configuration",
            Self::IoError(_) => "Check that the paths exist and are readable/writable",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Check free disk space and the output directory permissions"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedSnapshot { source_name, .. } => {
                format!("'{}' is not a readable Terraform state snapshot", source_name)
            }
            Self::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagraformError>;
