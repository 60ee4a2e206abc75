use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request to {tier} timed out after {timeout_ms}ms")]
    Timeout { tier: String, timeout_ms: u64 },

    #[error("Request to {tier} failed: {message}")]
    Transport { tier: String, message: String },

    #[error("All quiz data sources failed. Please check your connection and try again.")]
    ExhaustedSources { failures: Vec<String> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Timeout { .. }
            | ServiceError::Transport { .. }
            | ServiceError::ExhaustedSources { .. } => ErrorCategory::Network,
            ServiceError::SerializationError(_) | ServiceError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            ServiceError::ConfigError { .. }
            | ServiceError::ConfigValidationError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ServiceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一來源失敗不影響整體流程
            ErrorCategory::Network => match self {
                ServiceError::ExhaustedSources { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ServiceError::Timeout { .. } => "Increase timeout_ms or check the endpoint latency",
            ServiceError::Transport { .. } => "Check the endpoint URL and your network connection",
            ServiceError::ExhaustedSources { .. } => {
                "Check your connection, or make sure the bundled quiz file exists"
            }
            ServiceError::IoError(_) => "Check that the file exists and is readable",
            ServiceError::SerializationError(_) => "Check that the JSON file has the expected shape",
            ServiceError::ConfigError { .. }
            | ServiceError::ConfigValidationError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => "Review the configuration file and CLI flags",
            ServiceError::ValidationError { .. } => "Review the command arguments",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ServiceError::ExhaustedSources { failures } if !failures.is_empty() => {
                format!("{} ({} source(s) tried)", self, failures.len())
            }
            ServiceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_sources_message() {
        let err = ServiceError::ExhaustedSources {
            failures: vec!["remote-primary: timed out".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "All quiz data sources failed. Please check your connection and try again."
        );
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("1 source(s) tried"));
    }

    #[test]
    fn test_tier_failures_are_classified() {
        let timeout = ServiceError::Timeout {
            tier: "remote-primary".to_string(),
            timeout_ms: 10_000,
        };
        let transport = ServiceError::Transport {
            tier: "remote-secondary".to_string(),
            message: "connection refused".to_string(),
        };

        assert_eq!(timeout.category(), ErrorCategory::Network);
        assert_eq!(transport.category(), ErrorCategory::Network);
        assert_eq!(timeout.severity(), ErrorSeverity::Medium);
        assert_eq!(transport.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = ServiceError::MissingConfigError {
            field: "quiz.primary_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
