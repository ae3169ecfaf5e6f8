//! # Validation Module
//!
//! Primitive checks that the rule evaluators are built from.
//!
//! ## Two Flavors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Primitive Checks                                   │
//! │                                                                         │
//! │  Predicates (bool)                 Checks (ValidationResult)            │
//! │  ─────────────────                 ─────────────────────────            │
//! │  is_in_range                       check_length                         │
//! │  is_price_in_range                 check_range                          │
//! │  is_valid_username                                                      │
//! │  is_valid_email                                                         │
//! │                                                                         │
//! │  Predicates answer yes/no.         Checks say which field failed and    │
//! │                                    why, so composites can report every  │
//! │                                    violation.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{check_range, is_in_range, LengthBounds};
//!
//! assert!(is_in_range(50, 0, 100));
//! assert!(check_range("age", 19, 18, 100).is_ok());
//! assert!(LengthBounds::new(5, 15).contains("alfred"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Range Predicates
// =============================================================================

/// Returns true when `min <= value <= max`.
///
/// Both bounds are inclusive. Incomparable values (NaN) are never in range.
pub fn is_in_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// Returns true when a price lies within `[min, max]`.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::is_price_in_range;
///
/// let min = Money::zero();
/// let max = Money::from_major_minor(100, 0);
/// assert!(is_price_in_range(min, min, max));
/// assert!(is_price_in_range(max, min, max));
/// assert!(!is_price_in_range(Money::from_cents(-1), min, max));
/// ```
pub fn is_price_in_range(price: Money, min: Money, max: Money) -> bool {
    is_in_range(price, min, max)
}

// =============================================================================
// Length Bounds
// =============================================================================

/// Inclusive character-length bounds for a string field.
///
/// Length is counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    /// Shortest accepted length.
    pub min_length: usize,

    /// Longest accepted length.
    pub max_length: usize,
}

impl LengthBounds {
    /// Creates bounds for `[min_length, max_length]`.
    pub const fn new(min_length: usize, max_length: usize) -> Self {
        LengthBounds {
            min_length,
            max_length,
        }
    }

    /// Returns true when the character count of `value` is within bounds.
    pub fn contains(&self, value: &str) -> bool {
        is_in_range(value.chars().count(), self.min_length, self.max_length)
    }

    /// Returns true when `min_length <= max_length`.
    pub fn is_ordered(&self) -> bool {
        self.min_length <= self.max_length
    }
}

/// Standalone username predicate.
///
/// False for the empty string regardless of the configured minimum.
pub fn is_valid_username(name: &str, bounds: LengthBounds) -> bool {
    !name.is_empty() && bounds.contains(name)
}

// =============================================================================
// Email
// =============================================================================

/// Loose email shape check: `local@domain.tld`.
///
/// ## Rules
/// - No whitespace anywhere
/// - Exactly one `@`, with a non-empty local part
/// - The domain has a `.` with at least one character on each side
///
/// ## Example
/// ```rust
/// use storefront_core::validation::is_valid_email;
///
/// assert!(is_valid_email("name@domain.com"));
/// assert!(!is_valid_email("a"));
/// assert!(!is_valid_email("name@domain"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

// =============================================================================
// Field Checks
// =============================================================================

/// Checks that a string field's length is within bounds.
///
/// ## Errors
/// - `Required` for an empty string
/// - `TooShort` / `TooLong` otherwise
pub fn check_length(field: &str, value: &str, bounds: LengthBounds) -> ValidationResult<()> {
    let length = value.chars().count();

    if length == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if length < bounds.min_length {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: bounds.min_length,
        });
    }

    if length > bounds.max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: bounds.max_length,
        });
    }

    Ok(())
}

/// Checks that an integer field is within `[min, max]`.
pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if !is_in_range(value, min, max) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
