//! # Error Types
//!
//! Structured error types for gear_core. A corrupted intermediate value in a
//! strength rating is worse than a refused one: a `NaN` or `Inf` that reaches
//! a safety factor can be misread as "safe". Every stage therefore validates
//! its own denominators and logarithm arguments and raises eagerly instead of
//! letting bad arithmetic propagate.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::errors::{GearError, GearResult};
//!
//! fn validate_module(module_mm: f64) -> GearResult<()> {
//!     if module_mm <= 0.0 {
//!         return Err(GearError::invalid_input(
//!             "module_mm",
//!             module_mm.to_string(),
//!             "Module must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gear_core operations
pub type GearResult<T> = Result<T, GearError>;

/// Structured error type for gear rating operations.
///
/// Each variant provides specific context about what went wrong, so a caller
/// running a parametric sweep can report a single design-point failure
/// without guessing which input was at fault.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GearError {
    /// An input value is physically invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A division was about to run with a zero or non-positive denominator
    #[error("Zero denominator in {context}: {quantity} must be positive")]
    ZeroDenominator { quantity: String, context: String },

    /// A logarithm was about to run with a non-positive argument
    #[error("Logarithm domain error in {context}: argument {argument} must be positive")]
    LogDomain { argument: f64, context: String },
}

impl GearError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GearError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ZeroDenominator error
    pub fn zero_denominator(quantity: impl Into<String>, context: impl Into<String>) -> Self {
        GearError::ZeroDenominator {
            quantity: quantity.into(),
            context: context.into(),
        }
    }

    /// Create a LogDomain error
    pub fn log_domain(argument: f64, context: impl Into<String>) -> Self {
        GearError::LogDomain {
            argument,
            context: context.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GearError::InvalidInput { .. } => "INVALID_INPUT",
            GearError::ZeroDenominator { .. } => "ZERO_DENOMINATOR",
            GearError::LogDomain { .. } => "LOG_DOMAIN",
        }
    }
}
