use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Snapshot decoding error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("Snapshot is not a base64 data URL: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("TOML parsing error: {message}")]
    TomlError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
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
    Medium,
    High,
    Critical,
}

impl DoorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DoorError::ApiError(_) => ErrorCategory::Network,
            DoorError::SerializationError(_)
            | DoorError::DecodeError(_)
            | DoorError::InvalidSnapshot { .. } => ErrorCategory::Data,
            DoorError::UrlError(_)
            | DoorError::TomlError { .. }
            | DoorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DoorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 門鎖伺服器暫時不可達，重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DoorError::ApiError(e) if e.is_timeout() => {
                "The door server did not answer in time".to_string()
            }
            DoorError::ApiError(e) if e.is_connect() => {
                "Could not connect to the door server".to_string()
            }
            DoorError::ApiError(_) => "The request to the door server failed".to_string(),
            DoorError::SerializationError(_) => {
                "The door server sent a response that could not be read".to_string()
            }
            DoorError::DecodeError(_) | DoorError::InvalidSnapshot { .. } => {
                "The door server sent a snapshot that is not a readable image".to_string()
            }
            DoorError::IoError(e) => format!("Local file operation failed: {}", e),
            DoorError::UrlError(e) => format!("The server address is not usable: {}", e),
            DoorError::TomlError { message } => format!("The config file is invalid: {}", message),
            DoorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the door server is running and reachable, then try again",
            ErrorCategory::Data => "Make sure --base-url points at the door server and not another service",
            ErrorCategory::Configuration => "Fix the value in the config file or pass a correct --base-url",
            ErrorCategory::System => "Check that the config file exists and the output location is writable",
        }
    }
}

impl ErrorSeverity {
    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2, // 可重試
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DoorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = DoorError::InvalidConfigValueError {
            field: "server.base_url".to_string(),
            value: "nope".to_string(),
            reason: "Invalid URL format".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("server.base_url"));
    }

    #[test]
    fn test_malformed_body_is_data_error() {
        let err: DoorError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: DoorError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_severity_exit_codes() {
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }
}
