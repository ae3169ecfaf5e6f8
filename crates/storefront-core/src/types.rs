//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐       │
//! │  │    Coupon       │   │ ValidationReport │   │  ShippingQuote  │       │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │       │
//! │  │  code           │   │  Success         │   │  cost (Money)   │       │
//! │  │  discount (0,1) │   │  Failure(reasons)│   │  estimated_days │       │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  DiscountRate   │   │  ExchangeRate   │   │  Order / Card   │        │
//! │  │  bps (u32)      │   │  micros (u64)   │   │  ChargeResult   │        │
//! │  │  1000 = 10%     │   │  1_500_000=1.5  │   │  OrderOutcome   │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount represented in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a fraction (0.1 = 10%).
    ///
    /// Negative or non-finite fractions clamp to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        if !fraction.is_finite() || fraction <= 0.0 {
            return DiscountRate(0);
        }
        DiscountRate((fraction * 10_000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// Currency exchange rate in parts-per-million (1_000_000 = 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate(u64);

impl ExchangeRate {
    /// Creates a rate from parts-per-million.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        ExchangeRate(micros)
    }

    /// Creates a rate from a decimal (for convenience).
    pub fn from_decimal(rate: f64) -> Self {
        if !rate.is_finite() || rate <= 0.0 {
            return ExchangeRate(0);
        }
        ExchangeRate((rate * 1_000_000.0).round() as u64)
    }

    /// Returns the rate in parts-per-million.
    #[inline]
    pub const fn micros(&self) -> u64 {
        self.0
    }

    /// Identity rate (same currency).
    #[inline]
    pub const fn identity() -> Self {
        ExchangeRate(1_000_000)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount code from the coupon catalog.
///
/// ## Invariants
/// - `code` is non-empty
/// - `discount` is strictly between 0 and 1, and still so once rounded to
///   basis points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    /// Code the customer types at checkout (e.g. "SAVE10").
    pub code: String,

    /// Fraction taken off the price (0.1 = 10% off).
    pub discount: f64,
}

impl Coupon {
    /// Creates a coupon.
    pub fn new(code: impl Into<String>, discount: f64) -> Self {
        Coupon {
            code: code.into(),
            discount,
        }
    }

    /// Returns the discount as a basis-point rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_fraction(self.discount)
    }

    /// Checks the catalog invariants for this coupon.
    pub fn is_well_formed(&self) -> bool {
        !self.code.trim().is_empty()
            && self.discount > 0.0
            && self.discount < 1.0
            && (1..10_000).contains(&self.rate().bps())
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of a composite validation.
///
/// A failure lists every violated rule, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReport {
    /// Every rule passed.
    Success,
    /// One reason per violated rule, in evaluation order.
    Failure(Vec<String>),
}

impl ValidationReport {
    /// Builds a report from collected reasons; no reasons means success.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            ValidationReport::Success
        } else {
            ValidationReport::Failure(reasons)
        }
    }

    /// Builds a report from independent checks, keeping every failure.
    pub fn from_checks<I>(checks: I) -> Self
    where
        I: IntoIterator<Item = Result<(), ValidationError>>,
    {
        let reasons = checks
            .into_iter()
            .filter_map(Result::err)
            .map(|err| {
                debug!(error = %err, "Validation check failed");
                err.label()
            })
            .collect();
        Self::from_reasons(reasons)
    }

    /// Returns true when every rule passed.
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationReport::Success)
    }

    /// Returns the failure reasons (empty on success).
    pub fn reasons(&self) -> &[String] {
        match self {
            ValidationReport::Success => &[],
            ValidationReport::Failure(reasons) => reasons,
        }
    }
}

/// Renders `Validation successful` or `Invalid: <reason>, <reason>`.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReport::Success => write!(f, "Validation successful"),
            ValidationReport::Failure(reasons) => write!(f, "Invalid: {}", reasons.join(", ")),
        }
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// A shipping quote for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingQuote {
    /// Shipping cost.
    pub cost: Money,

    /// Estimated delivery time in days.
    pub estimated_days: u32,
}

// =============================================================================
// Orders & Payments
// =============================================================================

/// An order ready for payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Amount to charge.
    pub total: Money,
}

/// Card details handed to the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreditCard {
    /// Card number as entered.
    pub number: String,
}

/// Status reported by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    /// The card was charged.
    Success,
    /// The gateway declined or failed the charge.
    Failed,
}

/// Result of a single charge attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChargeResult {
    pub status: ChargeStatus,
}

/// Result of submitting an order.
///
/// `error` is omitted from JSON on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderOutcome {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl OrderOutcome {
    /// Successful submission.
    pub fn succeeded() -> Self {
        OrderOutcome {
            success: true,
            error: None,
        }
    }

    /// Failed submission with an error code.
    pub fn failed(error: impl Into<String>) -> Self {
        OrderOutcome {
            success: false,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
