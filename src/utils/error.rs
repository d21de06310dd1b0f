use std::time::Duration;
use thiserror::Error;

/// 單一來源抓取失敗的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport failure for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("unparsable response body from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },
}

impl FetchError {
    pub fn transport(endpoint: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(endpoint: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Race 結束但沒有勝出者
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    #[error("no source answered within {}ms", .deadline.as_millis())]
    Timeout { deadline: Duration },

    #[error("source {source_name} failed: {error}")]
    SourceFailed { source_name: String, error: FetchError },

    #[error("all {} sources failed", .failures.len())]
    AllSourcesFailed { failures: Vec<(String, FetchError)> },

    #[error("race started without any source")]
    NoSources,
}

#[derive(Error, Debug)]
pub enum CepError {
    #[error("Invalid zip code {input:?}: expected format 00000-000")]
    InvalidInput { input: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lookup failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Lookup failed: {0}")]
    Race(#[from] RaceError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CepError::InvalidInput { .. } => ErrorCategory::Input,
            CepError::Configuration { .. }
            | CepError::ConfigValidationError { .. }
            | CepError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CepError::Fetch(FetchError::Parse { .. }) => ErrorCategory::Data,
            CepError::Fetch(_) | CepError::Race(_) => ErrorCategory::Network,
            CepError::SerializationError(_) => ErrorCategory::Data,
            CepError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CepError::InvalidInput { .. } => ErrorSeverity::High,
            // 網路問題通常重試即可
            CepError::Fetch(_) | CepError::Race(_) => ErrorSeverity::Medium,
            CepError::ConfigValidationError { .. }
            | CepError::InvalidConfigValueError { .. }
            | CepError::SerializationError(_) => ErrorSeverity::High,
            CepError::Configuration { .. } | CepError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CepError::InvalidInput { .. } => {
                "invalid zip code format. It should be 00000-000.".to_string()
            }
            CepError::Race(RaceError::Timeout { deadline }) => format!(
                "the request to every source exceeded {}ms, resulting in a timeout.",
                deadline.as_millis()
            ),
            CepError::Race(RaceError::AllSourcesFailed { failures }) => {
                let names: Vec<&str> = failures.iter().map(|(name, _)| name.as_str()).collect();
                format!("every source failed to answer ({})", names.join(", "))
            }
            CepError::Race(RaceError::SourceFailed { source_name, .. }) => {
                format!("the request to {} failed", source_name)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Enter the zip code as five digits, a hyphen and three digits, e.g. 01310-100"
            }
            ErrorCategory::Configuration => "Check the TOML file and command line flags",
            ErrorCategory::Network => "Check your connection or raise --timeout-ms and try again",
            ErrorCategory::Data => "The source answered with an unexpected body; try again later",
            ErrorCategory::System => "Check the local environment (files, permissions, terminal)",
        }
    }
}

pub type Result<T> = std::result::Result<T, CepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_retryable_network_error() {
        let err = CepError::from(RaceError::Timeout {
            deadline: Duration::from_secs(1),
        });

        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("1000ms"));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = CepError::InvalidInput {
            input: "123".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("00000-000"));
        assert!(err.to_string().contains("\"123\""));
    }

    #[test]
    fn test_parse_error_is_data_category() {
        let err = CepError::from(FetchError::parse("http://x", "expected object"));
        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(FetchError::parse("http://x", "e").is_parse());
        assert!(!FetchError::transport("http://x", "e").is_parse());
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            CepError::InvalidInput {
                input: String::new(),
            },
            CepError::from(RaceError::NoSources),
            CepError::from(FetchError::transport("http://x", "refused")),
            CepError::Configuration {
                message: "regex".to_string(),
            },
            CepError::IoError(std::io::Error::other("stdin closed")),
        ];

        let codes: Vec<i32> = errors.iter().map(|e| e.severity().exit_code()).collect();
        assert_eq!(codes, vec![1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_configuration_error_is_critical() {
        let err = CepError::Configuration {
            message: "regex".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
