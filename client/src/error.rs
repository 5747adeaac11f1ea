//! Error types for the quotewall client
//!
//! This module defines error types for each layer:
//! - `QuoteServiceError`: remote quote service (HTTP adapter) errors
//! - `SessionError`: session token persistence errors
//! - `AppError`: classified errors surfaced to the presentation layer

use thiserror::Error;

/// Remote quote service errors
#[derive(Debug, Error)]
pub enum QuoteServiceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized - missing or rejected token")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Session store errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),
}

/// A single form field that failed local validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors of one form submission, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for a given field, if that field failed
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Application layer errors
///
/// Cloneable so the feed controller can retain the last one in its state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Login required")]
    AuthRequired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl AppError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, AppError::AuthRequired)
    }
}

impl From<QuoteServiceError> for AppError {
    fn from(e: QuoteServiceError) -> Self {
        match e {
            QuoteServiceError::Unauthorized => AppError::AuthRequired,
            QuoteServiceError::Request(err) if err.is_timeout() => {
                AppError::Network("request timed out".to_string())
            }
            QuoteServiceError::Timeout => AppError::Network("request timed out".to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_classifies_as_auth_required() {
        let err: AppError = QuoteServiceError::Unauthorized.into();
        assert_eq!(err, AppError::AuthRequired);
        assert!(err.is_auth_required());
    }

    #[test]
    fn api_and_timeout_classify_as_network() {
        let err: AppError = QuoteServiceError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err, AppError::Network("API error: 500 - boom".to_string()));

        let err: AppError = QuoteServiceError::Timeout.into();
        assert_eq!(err, AppError::Network("request timed out".to_string()));
    }

    #[test]
    fn validation_errors_display_and_lookup() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username is required");
        errors.add("otp", "OTP is required");

        assert_eq!(
            errors.to_string(),
            "username: Username is required; otp: OTP is required"
        );
        assert_eq!(errors.message_for("otp"), Some("OTP is required"));
        assert_eq!(errors.message_for("text"), None);
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
