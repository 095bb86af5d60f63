//! # Error Types
//!
//! Structured error types for boq_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Two kinds matter to callers:
//!
//! - [`CalcError::InvalidInput`] - bad input, always recoverable by re-prompting
//! - [`CalcError::GenerationFailed`] - the text-generation service produced nothing usable
//!
//! ## Example
//!
//! ```rust
//! use boq_core::errors::{CalcError, CalcResult};
//!
//! fn validate_area(area_m2: f64) -> CalcResult<()> {
//!     if area_m2 <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "area".to_string(),
//!             value: area_m2.to_string(),
//!             reason: "must be a positive number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for boq_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator and estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (unparseable, out of range, too short, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Calculation could not produce a meaningful quantity
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// The text-generation service failed to produce an estimation
    #[error("Material estimation failed via {provider}: {reason}")]
    GenerationFailed { provider: String, reason: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a GenerationFailed error
    pub fn generation_failed(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::GenerationFailed {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::Config {
            reason: reason.into(),
        }
    }

    /// Check if the caller can recover by correcting the input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::CalculationFailed { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::GenerationFailed { .. } => "GENERATION_FAILED",
            CalcError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length", "-5", "must be a positive number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_input("a", "b", "c").error_code(), "INVALID_INPUT");
        assert_eq!(
            CalcError::generation_failed("openai", "timeout").error_code(),
            "GENERATION_FAILED"
        );
        assert_eq!(CalcError::config("bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_recoverability() {
        assert!(
            CalcError::invalid_input("area", "0", "must be a positive number").is_recoverable()
        );
        assert!(CalcError::calculation_failed("Flooring", "tile area is zero").is_recoverable());
        assert!(!CalcError::generation_failed("ollama", "connection refused").is_recoverable());
    }

    #[test]
    fn test_display_names_field() {
        let error =
            CalcError::invalid_input("boq_items", "9 characters", "must be at least 10 characters");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'boq_items': 9 characters - must be at least 10 characters"
        );
    }
}
