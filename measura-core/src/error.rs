//! Structured errors for tool consumers
//!
//! Every layer has its own `thiserror` enum. At the outer surface they are
//! flattened into a `MeasuraError` carrying a machine-readable code.

use crate::DecimalError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const UNSUPPORTED_UNIT: &str = "UNSUPPORTED_UNIT";
    pub const UNKNOWN_MEASURE: &str = "UNKNOWN_MEASURE";
    pub const UNKNOWN_CONVERTER: &str = "UNKNOWN_CONVERTER";
    pub const UNKNOWN_SYSTEM: &str = "UNKNOWN_SYSTEM";
    pub const INVALID_DIGIT: &str = "INVALID_DIGIT";
    pub const SCALE_LIMIT: &str = "SCALE_LIMIT";
    pub const MALFORMED_STATE: &str = "MALFORMED_STATE";
    pub const ILLEGAL_STATE: &str = "ILLEGAL_STATE";
}

/// Structured error with a code, a message and an optional fix hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuraError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl MeasuraError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Use plain decimal notation such as 12.5 or -3")
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
    }

    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARGUMENT, format!("Invalid argument: {}", details.into()))
    }

    pub fn illegal_state(details: impl Into<String>) -> Self {
        Self::new(codes::ILLEGAL_STATE, format!("Illegal state: {}", details.into()))
    }
}

impl std::fmt::Display for MeasuraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MeasuraError {}

impl From<DecimalError> for MeasuraError {
    fn from(err: DecimalError) -> Self {
        match err {
            DecimalError::ParseError(s) => Self::parse_error(s),
            DecimalError::DivisionByZero => Self::div_zero(),
        }
    }
}
