//! # Untyped Input Boundary
//!
//! Rule entry points for values that arrive as JSON (form posts, IPC
//! payloads) where any type can show up in any position.
//!
//! Each function guards the type of every argument first, then hands typed
//! values to [`RuleBook`]. Nothing is coerced: the string `"10"` is not a
//! price and the string `"19"` is not an age. Any JSON number is an age,
//! including `19.5`.
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use storefront_core::input;
//! use storefront_core::rules::RuleBook;
//!
//! let book = RuleBook::default();
//! assert!(input::calculate_discount(&book, &json!("10"), &json!("SAVE10")).is_err());
//! assert!(input::calculate_discount(&book, &json!(10), &json!(10)).is_err());
//! assert_eq!(
//!     input::calculate_discount(&book, &json!(10), &json!("SAVE10")).unwrap().cents(),
//!     900
//! );
//! ```

use serde_json::Value;

use crate::error::{RuleError, RuleResult, ValidationError};
use crate::money::Money;
use crate::rules::RuleBook;
use crate::types::ValidationReport;
use crate::validation::{is_in_range, ValidationResult};

// =============================================================================
// Type Guards
// =============================================================================

/// Reads a JSON number as a price in dollars.
///
/// Fractions are rounded to the nearest cent. Strings, arrays, NaN and
/// amounts that do not fit in cents are rejected.
pub fn price(value: &Value) -> RuleResult<Money> {
    let number = match value {
        Value::Number(number) => number,
        other => {
            return Err(RuleError::InvalidPrice {
                reason: format!("expected a number, got {}", kind_of(other)),
            })
        }
    };

    if let Some(whole) = number.as_i64() {
        return whole
            .checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| RuleError::InvalidPrice {
                reason: format!("{number} is out of range"),
            });
    }

    // 2^63 is exactly representable, so anything strictly below it fits in i64
    match number.as_f64().map(|amount| (amount * 100.0).round()) {
        Some(cents) if cents.is_finite() && cents.abs() < i64::MAX as f64 => {
            Ok(Money::from_cents(cents as i64))
        }
        _ => Err(RuleError::InvalidPrice {
            reason: format!("{number} is out of range"),
        }),
    }
}

fn string_field<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a str> {
    value.as_str().ok_or_else(|| ValidationError::WrongType {
        field: field.to_string(),
        expected: "string".to_string(),
    })
}

/// Any JSON number is an age. Whole numbers use the typed check; fractional
/// ages are range-checked as floats.
fn age_field(book: &RuleBook, value: &Value) -> ValidationResult<()> {
    let Value::Number(number) = value else {
        return Err(ValidationError::WrongType {
            field: "age".to_string(),
            expected: "number".to_string(),
        });
    };

    if let Some(age) = number.as_i64() {
        return book.check_signup_age(age);
    }

    let signup = &book.config().signup;
    let in_range = number
        .as_f64()
        .is_some_and(|age| is_in_range(age, signup.min_age as f64, signup.max_age as f64));

    if in_range {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: signup.min_age,
            max: signup.max_age,
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Rule Entry Points
// =============================================================================

/// [`RuleBook::calculate_discount`] for untyped arguments.
///
/// The price is checked before the code.
pub fn calculate_discount(book: &RuleBook, price_value: &Value, code: &Value) -> RuleResult<Money> {
    let price = price(price_value)?;
    let code = code.as_str().ok_or_else(|| RuleError::InvalidCode {
        reason: format!("expected a string, got {}", kind_of(code)),
    })?;
    book.calculate_discount(price, code)
}

/// [`RuleBook::is_valid_username`] for an untyped argument.
///
/// Anything that is not a string (null, numbers, arrays) is invalid.
pub fn is_valid_username(book: &RuleBook, name: &Value) -> bool {
    name.as_str().is_some_and(|name| book.is_valid_username(name))
}

/// [`RuleBook::validate_user_input`] for untyped arguments.
///
/// A wrong type counts as a violation of that field, so a non-string
/// username and an out-of-range age are still reported together.
pub fn validate_user_input(book: &RuleBook, username: &Value, age: &Value) -> ValidationReport {
    let username_check =
        string_field("username", username).and_then(|name| book.check_signup_username(name));
    let age_check = age_field(book, age);

    ValidationReport::from_checks([username_check, age_check])
}

/// [`RuleBook::can_drive`] for untyped arguments.
pub fn can_drive(book: &RuleBook, age: &Value, country_code: &Value) -> RuleResult<bool> {
    let age = age
        .as_u64()
        .and_then(|age| u32::try_from(age).ok())
        .ok_or_else(|| ValidationError::WrongType {
            field: "age".to_string(),
            expected: "non-negative whole number".to_string(),
        })?;

    let country_code = country_code
        .as_str()
        .ok_or_else(|| RuleError::InvalidCountryCode(country_code.to_string()))?;

    book.can_drive(age, country_code)
}

// =============================================================================
// Unit Tests
// =============================================================================
