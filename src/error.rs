//! Structured Error Handling for fuzzytip
//!
//! A small unified error hierarchy with:
//! - Error codes for programmatic handling
//! - HTTP status code mapping for the web layer
//! - A JSON-friendly response shape
//!
//! Note that two outcomes are deliberately *not* errors anywhere in the
//! crate: a zero-activation defuzzification returns a tip of 0, and a
//! search that exhausts its frontier returns `None`. Errors here cover
//! the boundary only - malformed input and configuration problems.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input errors (1xxx)
    /// Generic validation error
    ValidationError = 1000,
    /// A required field was missing
    MissingField = 1001,
    /// A field did not parse as a number
    InvalidNumber = 1002,
    /// A score was outside the [0, 10] universe
    ScoreOutOfRange = 1003,

    // Config errors (2xxx)
    /// Generic config error
    ConfigError = 2000,
    /// Config file not found
    ConfigNotFound = 2001,
    /// Invalid config syntax
    InvalidConfigSyntax = 2002,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Validation error",
            ErrorCode::MissingField => "Missing required field",
            ErrorCode::InvalidNumber => "Invalid numeric value",
            ErrorCode::ScoreOutOfRange => "Score out of range",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::MissingField
            | ErrorCode::InvalidNumber
            | ErrorCode::ScoreOutOfRange => 400,

            ErrorCode::ConfigNotFound => 404,

            ErrorCode::ConfigError
            | ErrorCode::InvalidConfigSyntax
            | ErrorCode::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for fuzzytip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl TipError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    /// Create a generic validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Missing required field '{}'", field),
        )
    }

    /// Create an invalid number error
    pub fn invalid_number(field: &str, raw: &str) -> Self {
        Self::new(
            ErrorCode::InvalidNumber,
            format!("Field '{}' is not a valid number: '{}'", field, raw),
        )
    }

    /// Create an out-of-range score error
    pub fn score_out_of_range(field: &str, value: f64) -> Self {
        Self::new(
            ErrorCode::ScoreOutOfRange,
            format!("Field '{}' must be in [0, 10], got {}", field, value),
        )
        .with_hint("Quality scores range from 0 (worst) to 10 (best)")
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }

    /// Convert to a JSON string in the API response shape
    pub fn to_json(&self) -> String {
        serde_json::to_string(&ErrorResponse::from(self))
            .unwrap_or_else(|_| format!(r#"{{"error":true,"message":"{}"}}"#, self.message))
    }
}

impl fmt::Display for TipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for TipError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<std::io::Error> for TipError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            _ => ErrorCode::InternalError,
        };
        TipError::new(code, err.to_string())
    }
}

impl From<toml::de::Error> for TipError {
    fn from(err: toml::de::Error) -> Self {
        TipError::new(ErrorCode::InvalidConfigSyntax, err.to_string())
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using TipError
pub type TipResult<T> = Result<T, TipError>;

// ============================================================================
// Error response for the HTTP API
// ============================================================================

/// Structured error response for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator
    pub error: bool,
    /// Error code (string form)
    pub code: String,
    /// Numeric error code
    pub code_num: u32,
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub message: String,
    /// Hint for resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&TipError> for ErrorResponse {
    fn from(err: &TipError) -> Self {
        Self {
            error: true,
            code: format!("{:?}", err.code),
            code_num: err.code.code(),
            status: err.http_status(),
            message: err.message.clone(),
            hint: err.hint.clone(),
        }
    }
}

impl From<TipError> for ErrorResponse {
    fn from(err: TipError) -> Self {
        Self::from(&err)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TipError::validation("test error");
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "test error");
    }

    #[test]
    fn test_invalid_number_message() {
        let err = TipError::invalid_number("food", "abc");
        assert_eq!(err.code, ErrorCode::InvalidNumber);
        assert!(err.message.contains("food"));
        assert!(err.message.contains("abc"));
    }

    #[test]
    fn test_out_of_range_has_hint() {
        let err = TipError::score_out_of_range("service", 42.0);
        assert_eq!(err.code, ErrorCode::ScoreOutOfRange);
        assert!(err.hint.is_some());
    }

    #[test]
    fn test_error_http_status() {
        assert_eq!(TipError::validation("x").http_status(), 400);
        assert_eq!(TipError::missing_field("food").http_status(), 400);
        assert_eq!(TipError::internal("x").http_status(), 500);
    }

    #[test]
    fn test_error_is_client_error() {
        assert!(TipError::invalid_number("food", "?").is_client_error());
        assert!(!TipError::internal("x").is_client_error());
    }

    #[test]
    fn test_error_to_json() {
        let json = TipError::missing_field("service").to_json();
        assert!(json.contains("MissingField"));
        assert!(json.contains("service"));
    }

    #[test]
    fn test_error_display_with_hint() {
        let display = TipError::score_out_of_range("food", -1.0).to_string();
        assert!(display.contains("[1003]"));
        assert!(display.contains("Hint:"));
    }

    #[test]
    fn test_error_response_from_error() {
        let resp = ErrorResponse::from(TipError::invalid_number("food", "x"));
        assert!(resp.error);
        assert_eq!(resp.status, 400);
        assert_eq!(resp.code_num, 1002);
    }
}
