//! # Collaborators
//!
//! Narrow traits for every external service the storefront talks to.
//!
//! Production wiring supplies real clients; tests supply recording fakes.
//! All traits are `Send + Sync` so a [`crate::Storefront`] can be shared
//! behind an `Arc`.
//!
//! ## Provided Implementations
//! - [`NoOpAnalytics`] - drops page views
//! - [`UuidSecurityCodes`] - six-digit codes from UUID v4 entropy
//! - [`SystemClock`] - local wall-clock time

use chrono::{Local, NaiveDateTime};
use storefront_core::{ChargeResult, Clock, CreditCard, ExchangeRate, Money, ShippingQuote};
use uuid::Uuid;

use crate::error::ServiceResult;

// =============================================================================
// Traits
// =============================================================================

/// Currency exchange rate lookup.
pub trait ExchangeRates: Send + Sync {
    /// Rate to multiply an amount in `from` by to get `to`.
    fn rate(&self, from: &str, to: &str) -> ServiceResult<ExchangeRate>;
}

/// Shipping quote lookup.
pub trait ShippingQuotes: Send + Sync {
    /// Quote for a destination, or `None` when it cannot be served.
    fn quote(&self, destination: &str) -> Option<ShippingQuote>;
}

/// Page-view tracking.
pub trait Analytics: Send + Sync {
    fn track_page_view(&self, path: &str);
}

/// Card payments.
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount` to `card`.
    ///
    /// A declined card is `Ok` with a failed status; `Err` means the gateway
    /// itself could not be reached.
    fn charge(&self, card: &CreditCard, amount: Money) -> ServiceResult<ChargeResult>;
}

/// Outbound email.
pub trait Mailer: Send + Sync {
    fn send(&self, recipient: &str, message: &str) -> ServiceResult<()>;
}

/// One-time security code generation.
pub trait SecurityCodes: Send + Sync {
    fn generate(&self) -> u32;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Analytics sink that drops everything.
pub struct NoOpAnalytics;

impl Analytics for NoOpAnalytics {
    fn track_page_view(&self, _path: &str) {}
}

/// Six-digit security codes (100000-999999) drawn from UUID v4 randomness.
pub struct UuidSecurityCodes;

impl SecurityCodes for UuidSecurityCodes {
    fn generate(&self) -> u32 {
        let entropy = Uuid::new_v4().as_u128();
        100_000 + (entropy % 900_000) as u32
    }
}

/// Reads local wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_codes_have_six_digits() {
        let codes = UuidSecurityCodes;
        for _ in 0..100 {
            let code = codes.generate();
            assert_eq!(code.to_string().len(), 6, "{code}");
        }
    }

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now();
        assert!(now.and_utc().timestamp() > 1_700_000_000 - 86_400);
    }
}
