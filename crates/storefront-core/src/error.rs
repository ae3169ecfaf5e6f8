//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── RuleError        - A rule evaluator rejected its input             │
//! │  ├── ValidationError  - A single field failed a primitive check         │
//! │  └── ConfigError      - Rules configuration is malformed                │
//! │                                                                         │
//! │  storefront-services errors (separate crate)                            │
//! │  └── ServiceError     - Collaborator and config-file failures           │
//! │                                                                         │
//! │  Flow: ValidationError → RuleError → ServiceError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Convention
//! Every `RuleError` renders with a leading "Invalid", so callers that only
//! look at the text can match on it case-insensitively.

use thiserror::Error;

// =============================================================================
// Rule Error
// =============================================================================

/// Errors returned by single-rule evaluators.
///
/// Malformed input is a normal, reportable outcome here, never a panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// Price is negative, not finite, or not a number at all.
    #[error("Invalid price: {reason}")]
    InvalidPrice { reason: String },

    /// Discount code is not a string.
    ///
    /// Unknown codes are NOT an error; they simply do not discount.
    #[error("Invalid discount code: {reason}")]
    InvalidCode { reason: String },

    /// Country code is missing from the jurisdiction table.
    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    /// Validation error (wraps ValidationError).
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Single-field validation errors.
///
/// Produced by the primitive checks in [`crate::validation`] and collected by
/// the composite validator into a [`crate::types::ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value has the wrong type (e.g. a list where a string was expected).
    #[error("{field} must be a {expected}")]
    WrongType { field: String, expected: String },
}

impl ValidationError {
    /// Returns the name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::WrongType { field, .. } => field,
        }
    }

    /// Short label used in composite reports, e.g. "Invalid username".
    pub fn label(&self) -> String {
        format!("Invalid {}", self.field())
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Rules configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a `RulesConfig`.
    #[error("Failed to parse rules config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML.
    #[error("Failed to serialize rules config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but breaks a rule invariant.
    #[error("Invalid rules config: {0}")]
    Invalid(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with RuleError.
pub type RuleResult<T> = Result<T, RuleError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
