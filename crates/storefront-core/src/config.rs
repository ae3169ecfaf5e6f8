//! # Rules Configuration
//!
//! Every tunable of the rule evaluators lives here, as one read-only
//! structure handed to [`crate::rules::RuleBook`] at construction.
//!
//! This module only parses and checks configuration text. Locating and
//! reading `rules.toml` from disk is done by storefront-services.
//!
//! ## Configuration File Format
//! ```toml
//! # rules.toml
//! usernames = { min_length = 5, max_length = 15 }
//!
//! [[pricing.coupons]]
//! code = "SAVE10"
//! discount = 0.1
//!
//! [[pricing.coupons]]
//! code = "SAVE20"
//! discount = 0.2
//!
//! [signup]
//! username = { min_length = 3, max_length = 255 }
//! min_age = 18
//! max_age = 100
//!
//! [driving.minimum_ages]
//! US = 16
//! UK = 17
//!
//! [hours]
//! open_hour = 8
//! close_hour = 20
//!
//! [promotion]
//! month = 12
//! day = 25
//! discount = 0.2
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Coupon;
use crate::validation::LengthBounds;

// =============================================================================
// Pricing
// =============================================================================

/// Coupon catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    #[serde(default = "default_coupons")]
    pub coupons: Vec<Coupon>,
}

/// The built-in coupon catalog.
pub fn default_coupons() -> Vec<Coupon> {
    vec![Coupon::new("SAVE10", 0.1), Coupon::new("SAVE20", 0.2)]
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            coupons: default_coupons(),
        }
    }
}

// =============================================================================
// Sign-up
// =============================================================================

/// Bounds used by the composite user-input validator.
///
/// Deliberately separate from the standalone username predicate bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRules {
    #[serde(default = "default_signup_username")]
    pub username: LengthBounds,

    #[serde(default = "default_min_age")]
    pub min_age: i64,

    #[serde(default = "default_max_age")]
    pub max_age: i64,
}

fn default_signup_username() -> LengthBounds {
    LengthBounds::new(3, 255)
}

fn default_min_age() -> i64 {
    18
}

fn default_max_age() -> i64 {
    100
}

impl Default for SignupRules {
    fn default() -> Self {
        SignupRules {
            username: default_signup_username(),
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

fn default_username_bounds() -> LengthBounds {
    LengthBounds::new(5, 15)
}

// =============================================================================
// Driving
// =============================================================================

/// Jurisdiction table: country code → minimum driving age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingRules {
    #[serde(default = "default_minimum_ages")]
    pub minimum_ages: BTreeMap<String, u32>,
}

fn default_minimum_ages() -> BTreeMap<String, u32> {
    BTreeMap::from([("US".to_string(), 16), ("UK".to_string(), 17)])
}

impl Default for DrivingRules {
    fn default() -> Self {
        DrivingRules {
            minimum_ages: default_minimum_ages(),
        }
    }
}

// =============================================================================
// Store Hours
// =============================================================================

/// Daily opening window, in whole hours of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHours {
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,

    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
}

fn default_open_hour() -> u32 {
    8
}

fn default_close_hour() -> u32 {
    20
}

impl Default for StoreHours {
    fn default() -> Self {
        StoreHours {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
        }
    }
}

// =============================================================================
// Holiday Promotion
// =============================================================================

/// A discount granted for one calendar day every year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolidayPromotion {
    #[serde(default = "default_promotion_month")]
    pub month: u32,

    #[serde(default = "default_promotion_day")]
    pub day: u32,

    #[serde(default = "default_promotion_discount")]
    pub discount: f64,
}

fn default_promotion_month() -> u32 {
    12
}

fn default_promotion_day() -> u32 {
    25
}

fn default_promotion_discount() -> f64 {
    0.2
}

impl Default for HolidayPromotion {
    fn default() -> Self {
        HolidayPromotion {
            month: default_promotion_month(),
            day: default_promotion_day(),
            discount: default_promotion_discount(),
        }
    }
}

// =============================================================================
// Main Rules Configuration
// =============================================================================

/// Complete rules configuration.
///
/// Every section is optional in TOML and falls back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Bounds for the standalone username predicate.
    #[serde(default = "default_username_bounds")]
    pub usernames: LengthBounds,

    /// Coupon catalog.
    #[serde(default)]
    pub pricing: PricingRules,

    /// Composite sign-up validation bounds.
    #[serde(default)]
    pub signup: SignupRules,

    /// Minimum driving ages.
    #[serde(default)]
    pub driving: DrivingRules,

    /// Business hours.
    #[serde(default)]
    pub hours: StoreHours,

    /// Annual holiday promotion.
    #[serde(default)]
    pub promotion: HolidayPromotion,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            usernames: default_username_bounds(),
            pricing: PricingRules::default(),
            signup: SignupRules::default(),
            driving: DrivingRules::default(),
            hours: StoreHours::default(),
            promotion: HolidayPromotion::default(),
        }
    }
}

impl RulesConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: RulesConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pricing.coupons.is_empty() {
            return Err(ConfigError::Invalid(
                "coupon catalog must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for coupon in &self.pricing.coupons {
            if !coupon.is_well_formed() {
                return Err(ConfigError::Invalid(format!(
                    "coupon '{}' must have a code and a discount between 0.0001 and 0.9999, got {}",
                    coupon.code, coupon.discount
                )));
            }
            if !seen.insert(coupon.code.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate coupon code '{}'",
                    coupon.code
                )));
            }
        }

        if !self.usernames.is_ordered() || !self.signup.username.is_ordered() {
            return Err(ConfigError::Invalid(
                "username min_length must not exceed max_length".into(),
            ));
        }

        if self.signup.min_age > self.signup.max_age {
            return Err(ConfigError::Invalid(format!(
                "signup min_age {} exceeds max_age {}",
                self.signup.min_age, self.signup.max_age
            )));
        }

        if self.driving.minimum_ages.keys().any(|code| code.trim().is_empty()) {
            return Err(ConfigError::Invalid("empty country code in driving table".into()));
        }

        if self.hours.open_hour >= self.hours.close_hour || self.hours.close_hour > 24 {
            return Err(ConfigError::Invalid(format!(
                "store hours {}..{} must satisfy open < close <= 24",
                self.hours.open_hour, self.hours.close_hour
            )));
        }

        // 2000 is a leap year, so 29 February is accepted
        if NaiveDate::from_ymd_opt(2000, self.promotion.month, self.promotion.day).is_none() {
            return Err(ConfigError::Invalid(format!(
                "promotion date {}-{} is not a calendar day",
                self.promotion.month, self.promotion.day
            )));
        }

        if !(0.0..1.0).contains(&self.promotion.discount) {
            return Err(ConfigError::Invalid(format!(
                "promotion discount {} must be in [0, 1)",
                self.promotion.discount
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
