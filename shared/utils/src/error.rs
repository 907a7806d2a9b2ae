use serde::{Deserialize, Serialize};
use thiserror::Error;
use yardim_models::ParseError;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum YardimError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Workflow error: {message}")]
    Workflow { message: String },

    #[error("Authorization error: {message}")]
    Authorization { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl YardimError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn workflow(message: impl Into<String>) -> Self {
        Self::Workflow {
            message: message.into(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Workflow { .. } => "WORKFLOW_ERROR",
            Self::Authorization { .. } => "AUTHORIZATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            // Rule violations are shown to the user like validation failures
            Self::Workflow { .. } => 400,
            Self::Authorization { .. } => 403,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type YardimResult<T> = Result<T, YardimError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<YardimError> for ErrorResponse {
    fn from(error: YardimError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

impl From<ParseError> for YardimError {
    fn from(error: ParseError) -> Self {
        Self::validation(error.kind, error.to_string())
    }
}

impl From<serde_json::Error> for YardimError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<config::ConfigError> for YardimError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
