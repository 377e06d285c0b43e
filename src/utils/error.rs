use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API returned HTTP {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("API rejected the request (HTTP {status}) - bad or missing API key?")]
    AuthError { status: u16 },

    #[error("No API key found (checked ${env_var} and the config file)")]
    MissingApiKeyError { env_var: &'static str },

    #[error("Unknown profile '{name}' (known profiles: {known})")]
    UnknownProfileError { name: String, known: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuditError::ApiError(_) | AuditError::ApiStatusError { .. } => ErrorSeverity::Medium,
            AuditError::AuthError { .. }
            | AuditError::MissingApiKeyError { .. }
            | AuditError::UnknownProfileError { .. }
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorSeverity::High,
            AuditError::IoError(_) | AuditError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::ApiError(e) => format!("Could not reach the NextDNS API: {}", e),
            AuditError::ApiStatusError { status, .. } => {
                format!("The NextDNS API answered with HTTP {}", status)
            }
            AuditError::AuthError { .. } => "The NextDNS API rejected the request".to_string(),
            AuditError::MissingApiKeyError { .. } => "No API key configured".to_string(),
            AuditError::UnknownProfileError { name, .. } => {
                format!("Profile '{}' is not in the config file", name)
            }
            AuditError::SerializationError(e) => format!("Could not parse JSON: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AuditError::ApiError(_) => {
                "Check your network connection and try again".to_string()
            }
            AuditError::ApiStatusError { .. } => {
                "The service may be having issues; retry in a moment".to_string()
            }
            AuditError::AuthError { .. } | AuditError::MissingApiKeyError { .. } => {
                "Set NEXTDNS_API_KEY or add an \"api_key\" entry to the config file".to_string()
            }
            AuditError::UnknownProfileError { known, .. } => {
                format!("Use one of the configured profile names: {}", known)
            }
            AuditError::SerializationError(_) => {
                "Verify the input file contains log entries saved with --save".to_string()
            }
            AuditError::IoError(_) => "Check the file path and permissions".to_string(),
            AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => {
                "Fix the flagged configuration value and rerun".to_string()
            }
        }
    }
}
