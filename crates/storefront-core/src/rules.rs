//! # Rule Evaluators
//!
//! [`RuleBook`] owns a validated [`RulesConfig`] and evaluates every
//! storefront rule against it.
//!
//! ## Evaluation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  validate_user_input("ad", 101)          ← composite                    │
//! │       │                                                                 │
//! │       ├── check_length("username") ──► Err(TooShort) ──┐                │
//! │       │                                                │ collect ALL    │
//! │       └── check_range("age") ────────► Err(OutOfRange) ┘                │
//! │                                                                         │
//! │  ValidationReport::Failure(["Invalid username", "Invalid age"])         │
//! │                                                                         │
//! │  calculate_discount($10, "SAVE10")       ← single rule                  │
//! │       │                                                                 │
//! │       ├── price < 0?  → Err(InvalidPrice)                               │
//! │       ├── known code  → Ok($9.00)                                       │
//! │       └── unknown     → Ok($10.00)   (unchanged, not an error)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::RulesConfig;
use crate::error::{ConfigResult, RuleError, RuleResult};
use crate::money::Money;
use crate::schedule::StoreCalendar;
use crate::types::{Coupon, ValidationReport};
use crate::validation::{check_length, check_range, is_valid_username, ValidationResult};

// =============================================================================
// Rule Book
// =============================================================================

/// Read-only rule evaluator over one [`RulesConfig`].
#[derive(Debug, Clone)]
pub struct RuleBook {
    config: RulesConfig,
    calendar: StoreCalendar,
}

impl RuleBook {
    /// Creates a rule book after validating the configuration.
    pub fn new(config: RulesConfig) -> ConfigResult<Self> {
        config.validate()?;
        let calendar = StoreCalendar::new(config.hours, config.promotion);
        Ok(RuleBook { config, calendar })
    }

    /// Returns the configuration this book evaluates against.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Returns the business-hours and promotion calendar.
    pub fn calendar(&self) -> &StoreCalendar {
        &self.calendar
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Returns the coupon catalog. Never empty.
    pub fn coupons(&self) -> &[Coupon] {
        &self.config.pricing.coupons
    }

    /// Looks up a coupon by exact code.
    pub fn find_coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons().iter().find(|coupon| coupon.code == code)
    }

    /// Applies a coupon code to a price.
    ///
    /// ## Rules
    /// - Negative price → `RuleError::InvalidPrice`
    /// - Known code → `price * (1 - discount)`
    /// - Unknown code → `price` unchanged
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::rules::RuleBook;
    ///
    /// let book = RuleBook::default();
    /// let price = Money::from_major_minor(10, 0);
    /// assert_eq!(book.calculate_discount(price, "SAVE10").unwrap().cents(), 900);
    /// assert_eq!(book.calculate_discount(price, "INVALID").unwrap(), price);
    /// ```
    pub fn calculate_discount(&self, price: Money, code: &str) -> RuleResult<Money> {
        if price.is_negative() {
            return Err(RuleError::InvalidPrice {
                reason: format!("{price} is negative"),
            });
        }

        match self.find_coupon(code) {
            Some(coupon) => {
                let discounted = price.apply_discount(coupon.rate()).ok_or_else(|| {
                    RuleError::InvalidPrice {
                        reason: format!("{price} is out of range after discount"),
                    }
                })?;
                debug!(code = %code, %price, %discounted, "Applied coupon");
                Ok(discounted)
            }
            None => {
                debug!(code = %code, "Unknown coupon code, price unchanged");
                Ok(price)
            }
        }
    }

    // =========================================================================
    // Usernames & Sign-up
    // =========================================================================

    /// Standalone username predicate using the `usernames` bounds.
    pub fn is_valid_username(&self, name: &str) -> bool {
        is_valid_username(name, self.config.usernames)
    }

    /// Validates a username and age together, reporting every violation.
    ///
    /// Uses the `signup` bounds, which are separate from the standalone
    /// username predicate.
    pub fn validate_user_input(&self, username: &str, age: i64) -> ValidationReport {
        ValidationReport::from_checks([
            self.check_signup_username(username),
            self.check_signup_age(age),
        ])
    }

    /// Sign-up username length check.
    pub fn check_signup_username(&self, username: &str) -> ValidationResult<()> {
        check_length("username", username, self.config.signup.username)
    }

    /// Sign-up age range check.
    pub fn check_signup_age(&self, age: i64) -> ValidationResult<()> {
        let signup = &self.config.signup;
        check_range("age", age, signup.min_age, signup.max_age)
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Returns the minimum driving age for a country code, if known.
    pub fn minimum_driving_age(&self, country_code: &str) -> Option<u32> {
        self.config.driving.minimum_ages.get(country_code).copied()
    }

    /// Decides whether someone of `age` may drive in `country_code`.
    ///
    /// Exactly the minimum age qualifies. Unknown codes are an error, never a
    /// default.
    pub fn can_drive(&self, age: u32, country_code: &str) -> RuleResult<bool> {
        let minimum = self
            .minimum_driving_age(country_code)
            .ok_or_else(|| RuleError::InvalidCountryCode(country_code.to_string()))?;

        let allowed = age >= minimum;
        debug!(age, country = %country_code, minimum, allowed, "Evaluated driving age");
        Ok(allowed)
    }

    // =========================================================================
    // Time-gated
    // =========================================================================

    /// Whether the store is open at `now`.
    pub fn is_online(&self, now: NaiveDateTime) -> bool {
        self.calendar.is_open_at(now)
    }

    /// Holiday discount fraction for `now` (0 on ordinary days).
    pub fn holiday_discount(&self, now: NaiveDateTime) -> f64 {
        self.calendar.discount_at(now)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        let config = RulesConfig::default();
        let calendar = StoreCalendar::new(config.hours, config.promotion);
        RuleBook { config, calendar }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountRate;

    fn dollars(amount: i64) -> Money {
        Money::from_major_minor(amount, 0)
    }

    #[test]
    fn test_coupons_are_well_formed() {
        let book = RuleBook::default();
        assert!(!book.coupons().is_empty());

        for coupon in book.coupons() {
            assert!(!coupon.code.is_empty());
            assert!(coupon.discount > 0.0);
            assert!(coupon.discount < 1.0);
        }
    }

    #[test]
    fn test_calculate_discount_known_codes() {
        let book = RuleBook::default();
        assert_eq!(book.calculate_discount(dollars(10), "SAVE10").unwrap(), dollars(9));
        assert_eq!(book.calculate_discount(dollars(10), "SAVE20").unwrap(), dollars(8));
    }

    #[test]
    fn test_calculate_discount_matches_catalog_formula() {
        let book = RuleBook::default();
        let price = Money::from_cents(12_345);

        for coupon in book.coupons() {
            let expected = price
                .apply_discount(DiscountRate::from_fraction(coupon.discount))
                .unwrap();
            assert_eq!(book.calculate_discount(price, &coupon.code).unwrap(), expected);
        }
    }

    #[test]
    fn test_calculate_discount_unknown_code_keeps_price() {
        let book = RuleBook::default();
        assert_eq!(book.calculate_discount(dollars(10), "INVALID").unwrap(), dollars(10));
        assert_eq!(book.calculate_discount(dollars(10), "save10").unwrap(), dollars(10));
    }

    #[test]
    fn test_calculate_discount_negative_price() {
        let book = RuleBook::default();
        let err = book.calculate_discount(dollars(-10), "SAVE10").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPrice { .. }));
        assert!(err.to_string().to_lowercase().contains("invalid"));
    }

    #[test]
    fn test_calculate_discount_zero_price() {
        let book = RuleBook::default();
        assert_eq!(book.calculate_discount(Money::zero(), "SAVE20").unwrap(), Money::zero());
    }

    #[test]
    fn test_validate_user_input_success() {
        let book = RuleBook::default();
        let report = book.validate_user_input("alfred", 19);
        assert!(report.is_success());
        assert!(report.to_string().to_lowercase().contains("success"));
    }

    #[test]
    fn test_validate_user_input_single_failures() {
        let book = RuleBook::default();
        let too_long = "s".repeat(256);

        let cases = [
            ("sh", 19, "Invalid username"),
            ("", 19, "Invalid username"),
            (too_long.as_str(), 19, "Invalid username"),
            ("alfred", 16, "Invalid age"),
            ("alfred", 101, "Invalid age"),
        ];

        for (username, age, reason) in cases {
            let report = book.validate_user_input(username, age);
            assert_eq!(report.reasons(), [reason.to_string()], "({username:?}, {age})");
        }
    }

    #[test]
    fn test_validate_user_input_reports_every_violation() {
        let book = RuleBook::default();
        let report = book.validate_user_input("ad", 101);
        let message = report.to_string().to_lowercase();

        assert!(message.contains("invalid username"));
        assert!(message.contains("invalid age"));
        assert_eq!(report.reasons().len(), 2);
    }

    #[test]
    fn test_validate_user_input_boundaries() {
        let book = RuleBook::default();
        assert!(book.validate_user_input("abc", 18).is_success());
        assert!(book.validate_user_input(&"s".repeat(255), 100).is_success());
    }

    #[test]
    fn test_username_policies_are_independent() {
        let book = RuleBook::default();
        // Four characters: fine for sign-up (3..=255), too short standalone (5..=15)
        assert!(book.validate_user_input("abcd", 30).is_success());
        assert!(!book.is_valid_username("abcd"));
    }

    #[test]
    fn test_can_drive() {
        let book = RuleBook::default();

        let cases = [
            (15, "US", false),
            (16, "US", true),
            (17, "US", true),
            (16, "UK", false),
            (17, "UK", true),
            (18, "UK", true),
        ];

        for (age, country, expected) in cases {
            assert_eq!(book.can_drive(age, country).unwrap(), expected, "({age}, {country})");
        }
    }

    #[test]
    fn test_can_drive_unknown_country() {
        let book = RuleBook::default();
        let err = book.can_drive(18, "NGN").unwrap_err();
        assert_eq!(err, RuleError::InvalidCountryCode("NGN".to_string()));
        assert!(err.to_string().to_lowercase().contains("invalid"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = RulesConfig::default();
        config.pricing.coupons.clear();
        assert!(RuleBook::new(config).is_err());
    }
}
