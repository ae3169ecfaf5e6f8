//! # Storefront Services
//!
//! [`Storefront`] ties the pure [`RuleBook`] to injected collaborators.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  submit_order(order, card)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentGateway::charge(card, order.total)   ← injected                 │
//! │       │                                                                 │
//! │       ├── Success → OrderOutcome { success: true }                      │
//! │       └── Failed  → OrderOutcome { success: false,                      │
//! │                                    error: "payment_error" }             │
//! │                                                                         │
//! │  sign_up(email)                                                         │
//! │       │                                                                 │
//! │       ├── is_valid_email? no → false (nothing sent)                     │
//! │       └── Mailer::send(email, "Welcome aboard!") → true                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use storefront_core::validation::is_valid_email;
use storefront_core::{
    ChargeStatus, Clock, CreditCard, Money, Order, OrderOutcome, RuleBook, RuleError,
};
use tracing::{debug, info, warn};

use crate::collaborators::{
    Analytics, ExchangeRates, Mailer, PaymentGateway, SecurityCodes, ShippingQuotes,
};
use crate::error::ServiceResult;

/// Currency all catalog prices are quoted in.
pub const BASE_CURRENCY: &str = "USD";

/// Path reported to analytics when the home page renders.
pub const HOME_PATH: &str = "/home";

/// Body of the sign-up email.
pub const WELCOME_MESSAGE: &str = "Welcome aboard!";

/// Error code returned when a charge fails.
pub const PAYMENT_ERROR: &str = "payment_error";

// =============================================================================
// Collaborators Bundle
// =============================================================================

/// Every external dependency of the storefront.
#[derive(Clone)]
pub struct Collaborators {
    pub exchange_rates: Arc<dyn ExchangeRates>,
    pub shipping: Arc<dyn ShippingQuotes>,
    pub analytics: Arc<dyn Analytics>,
    pub payments: Arc<dyn PaymentGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub security_codes: Arc<dyn SecurityCodes>,
    pub clock: Arc<dyn Clock>,
}

// =============================================================================
// Storefront
// =============================================================================

/// Storefront operations over a rule book and its collaborators.
pub struct Storefront {
    rules: RuleBook,
    collaborators: Collaborators,
}

impl Storefront {
    /// Creates a storefront.
    pub fn new(rules: RuleBook, collaborators: Collaborators) -> Self {
        Storefront {
            rules,
            collaborators,
        }
    }

    /// Returns the rule book.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    // =========================================================================
    // Pricing & Shipping
    // =========================================================================

    /// Converts a base-currency price into `currency`.
    pub fn price_in_currency(&self, price: Money, currency: &str) -> ServiceResult<Money> {
        let rate = self
            .collaborators
            .exchange_rates
            .rate(BASE_CURRENCY, currency)?;
        let converted = price.convert(rate).ok_or_else(|| RuleError::InvalidPrice {
            reason: format!("{price} is out of range in {currency}"),
        })?;
        debug!(%price, currency = %currency, %converted, "Converted price");
        Ok(converted)
    }

    /// Human-readable shipping line for a destination.
    ///
    /// `"Shipping Cost: $14 (3 Days)"` (cents shown only when non-zero), or
    /// `"Shipping Unavailable"` when no quote exists.
    pub fn shipping_info(&self, destination: &str) -> String {
        match self.collaborators.shipping.quote(destination) {
            Some(quote) => format!(
                "Shipping Cost: {} ({} Days)",
                quote.cost.to_compact_string(),
                quote.estimated_days
            ),
            None => {
                debug!(destination = %destination, "No shipping quote");
                "Shipping Unavailable".to_string()
            }
        }
    }

    /// Renders the home page and records the page view.
    pub fn render_page(&self) -> String {
        self.collaborators.analytics.track_page_view(HOME_PATH);
        "<div>content</div>".to_string()
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Charges the card for the order total.
    ///
    /// A declined charge is a normal outcome, not an `Err`.
    pub fn submit_order(&self, order: &Order, card: &CreditCard) -> ServiceResult<OrderOutcome> {
        let result = self.collaborators.payments.charge(card, order.total)?;

        match result.status {
            ChargeStatus::Success => {
                info!(total = %order.total, "Order paid");
                Ok(OrderOutcome::succeeded())
            }
            ChargeStatus::Failed => {
                warn!(total = %order.total, "Payment failed");
                Ok(OrderOutcome::failed(PAYMENT_ERROR))
            }
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Registers an email address and sends the welcome email.
    ///
    /// Returns `false` without sending anything when the address is invalid.
    pub fn sign_up(&self, email: &str) -> ServiceResult<bool> {
        if !is_valid_email(email) {
            debug!(email = %email, "Rejected sign-up email");
            return Ok(false);
        }

        self.collaborators.mailer.send(email, WELCOME_MESSAGE)?;
        info!(email = %email, "Welcome email sent");
        Ok(true)
    }

    /// Emails a freshly generated security code to `email`.
    pub fn login(&self, email: &str) -> ServiceResult<()> {
        let code = self.collaborators.security_codes.generate();
        self.collaborators.mailer.send(email, &code.to_string())?;
        info!(email = %email, "Login code sent");
        Ok(())
    }

    // =========================================================================
    // Time-gated
    // =========================================================================

    /// Whether the store is open right now.
    pub fn is_online(&self) -> bool {
        self.rules.calendar().is_open(self.collaborators.clock.as_ref())
    }

    /// Today's promotion discount (0 on ordinary days).
    pub fn current_discount(&self) -> f64 {
        self.rules.calendar().discount(self.collaborators.clock.as_ref())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use storefront_core::schedule::parse_local;
    use storefront_core::{ChargeResult, ExchangeRate, FixedClock, ShippingQuote};

    use crate::error::ServiceError;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    struct FakeRates {
        rate: Option<f64>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ExchangeRates for FakeRates {
        fn rate(&self, from: &str, to: &str) -> ServiceResult<ExchangeRate> {
            self.calls
                .lock()
                .unwrap()
                .push((from.to_string(), to.to_string()));
            self.rate
                .map(ExchangeRate::from_decimal)
                .ok_or_else(|| ServiceError::collaborator("exchange rates", "unavailable"))
        }
    }

    struct FakeShipping(Option<ShippingQuote>);

    impl ShippingQuotes for FakeShipping {
        fn quote(&self, _destination: &str) -> Option<ShippingQuote> {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingAnalytics(Mutex<Vec<String>>);

    impl Analytics for RecordingAnalytics {
        fn track_page_view(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }
    }

    struct FakeGateway {
        status: ChargeStatus,
        calls: Mutex<Vec<(CreditCard, Money)>>,
    }

    impl PaymentGateway for FakeGateway {
        fn charge(&self, card: &CreditCard, amount: Money) -> ServiceResult<ChargeResult> {
            self.calls.lock().unwrap().push((card.clone(), amount));
            Ok(ChargeResult {
                status: self.status,
            })
        }
    }

    #[derive(Default)]
    struct RecordingMailer(Mutex<Vec<(String, String)>>);

    impl Mailer for RecordingMailer {
        fn send(&self, recipient: &str, message: &str) -> ServiceResult<()> {
            self.0
                .lock()
                .unwrap()
                .push((recipient.to_string(), message.to_string()));
            Ok(())
        }
    }

    struct FixedCodes(u32);

    impl SecurityCodes for FixedCodes {
        fn generate(&self) -> u32 {
            self.0
        }
    }

    struct Fakes {
        rates: Arc<FakeRates>,
        shipping: Arc<FakeShipping>,
        analytics: Arc<RecordingAnalytics>,
        gateway: Arc<FakeGateway>,
        mailer: Arc<RecordingMailer>,
        codes: Arc<FixedCodes>,
        clock: Arc<FixedClock>,
    }

    impl Default for Fakes {
        fn default() -> Self {
            Fakes {
                rates: Arc::new(FakeRates {
                    rate: Some(1.5),
                    calls: Mutex::default(),
                }),
                shipping: Arc::new(FakeShipping(None)),
                analytics: Arc::default(),
                gateway: Arc::new(FakeGateway {
                    status: ChargeStatus::Success,
                    calls: Mutex::default(),
                }),
                mailer: Arc::default(),
                codes: Arc::new(FixedCodes(123_456)),
                clock: Arc::new(FixedClock::new(parse_local("2025-09-15 12:00").unwrap())),
            }
        }
    }

    impl Fakes {
        fn storefront(&self) -> Storefront {
            Storefront::new(
                RuleBook::default(),
                Collaborators {
                    exchange_rates: self.rates.clone(),
                    shipping: self.shipping.clone(),
                    analytics: self.analytics.clone(),
                    payments: self.gateway.clone(),
                    mailer: self.mailer.clone(),
                    security_codes: self.codes.clone(),
                    clock: self.clock.clone(),
                },
            )
        }
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_price_in_currency() {
        let fakes = Fakes::default();
        let price = fakes
            .storefront()
            .price_in_currency(Money::from_major_minor(10, 0), "AUD")
            .unwrap();

        assert_eq!(price, Money::from_major_minor(15, 0));
        assert_eq!(
            *fakes.rates.calls.lock().unwrap(),
            [("USD".to_string(), "AUD".to_string())]
        );
    }

    #[test]
    fn test_price_in_currency_propagates_rate_failure() {
        let fakes = Fakes {
            rates: Arc::new(FakeRates {
                rate: None,
                calls: Mutex::default(),
            }),
            ..Fakes::default()
        };

        let result = fakes
            .storefront()
            .price_in_currency(Money::from_major_minor(10, 0), "AUD");
        assert!(matches!(result, Err(ServiceError::Collaborator { .. })));
    }

    #[test]
    fn test_price_in_currency_out_of_range() {
        let fakes = Fakes {
            rates: Arc::new(FakeRates {
                rate: Some(3.0),
                calls: Mutex::default(),
            }),
            ..Fakes::default()
        };

        let result = fakes
            .storefront()
            .price_in_currency(Money::from_cents(i64::MAX / 2 + 1), "AUD");
        assert!(matches!(
            result,
            Err(ServiceError::Rule(RuleError::InvalidPrice { .. }))
        ));
    }

    #[test]
    fn test_shipping_info_known_destination() {
        let fakes = Fakes {
            shipping: Arc::new(FakeShipping(Some(ShippingQuote {
                cost: Money::from_major_minor(14, 0),
                estimated_days: 3,
            }))),
            ..Fakes::default()
        };

        let info = fakes.storefront().shipping_info("lagos");
        assert_eq!(info, "Shipping Cost: $14 (3 Days)");
        assert!(info.to_lowercase().contains("$14 (3 days)"));
    }

    #[test]
    fn test_shipping_info_keeps_non_zero_cents() {
        let fakes = Fakes {
            shipping: Arc::new(FakeShipping(Some(ShippingQuote {
                cost: Money::from_major_minor(14, 50),
                estimated_days: 5,
            }))),
            ..Fakes::default()
        };

        let info = fakes.storefront().shipping_info("lagos");
        assert_eq!(info, "Shipping Cost: $14.50 (5 Days)");
    }

    #[test]
    fn test_shipping_info_unknown_destination() {
        let fakes = Fakes::default();
        let info = fakes.storefront().shipping_info("unknown");
        assert!(info.to_lowercase().contains("unavailable"));
    }

    #[test]
    fn test_render_page_returns_content() {
        let fakes = Fakes::default();
        assert!(fakes.storefront().render_page().contains("content"));
    }

    #[test]
    fn test_render_page_tracks_home_view() {
        let fakes = Fakes::default();
        fakes.storefront().render_page();
        assert_eq!(*fakes.analytics.0.lock().unwrap(), ["/home"]);
    }

    #[test]
    fn test_submit_order_charges_card_with_total() {
        let fakes = Fakes::default();
        let card = CreditCard {
            number: "33244332".to_string(),
        };
        let order = Order {
            total: Money::from_major_minor(3432, 0),
        };

        fakes.storefront().submit_order(&order, &card).unwrap();

        assert_eq!(*fakes.gateway.calls.lock().unwrap(), [(card, order.total)]);
    }

    #[test]
    fn test_submit_order_payment_failure() {
        let fakes = Fakes {
            gateway: Arc::new(FakeGateway {
                status: ChargeStatus::Failed,
                calls: Mutex::default(),
            }),
            ..Fakes::default()
        };
        let card = CreditCard {
            number: "33244332".to_string(),
        };
        let order = Order {
            total: Money::from_major_minor(3432, 0),
        };

        let outcome = fakes.storefront().submit_order(&order, &card).unwrap();

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("error"));
    }

    #[test]
    fn test_submit_order_success_has_no_error() {
        let fakes = Fakes::default();
        let card = CreditCard {
            number: "33244332".to_string(),
        };
        let order = Order {
            total: Money::from_major_minor(3432, 0),
        };

        let outcome = fakes.storefront().submit_order(&order, &card).unwrap();

        assert_eq!(outcome, OrderOutcome::succeeded());
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_sign_up_rejects_invalid_email() {
        let fakes = Fakes::default();
        assert!(!fakes.storefront().sign_up("a").unwrap());
        assert!(fakes.mailer.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sign_up_accepts_valid_email() {
        let fakes = Fakes::default();
        assert!(fakes.storefront().sign_up("name@domain.com").unwrap());
    }

    #[test]
    fn test_sign_up_sends_welcome_email_once() {
        let fakes = Fakes::default();
        fakes.storefront().sign_up("name@domain.com").unwrap();

        let sent = fakes.mailer.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (recipient, message) = &sent[0];
        assert_eq!(recipient, "name@domain.com");
        assert!(message.to_lowercase().contains("welcome"));
    }

    #[test]
    fn test_login_emails_generated_code() {
        let fakes = Fakes::default();
        fakes.storefront().login("name@domain.com").unwrap();

        assert_eq!(
            *fakes.mailer.0.lock().unwrap(),
            [("name@domain.com".to_string(), "123456".to_string())]
        );
    }

    #[test]
    fn test_is_online_follows_clock() {
        let fakes = Fakes::default();
        let storefront = fakes.storefront();

        fakes.clock.set(parse_local("2025-09-15 07:59").unwrap());
        assert!(!storefront.is_online());

        fakes.clock.set(parse_local("2025-09-15 20:01").unwrap());
        assert!(!storefront.is_online());

        fakes.clock.set(parse_local("2025-09-15 08:01").unwrap());
        assert!(storefront.is_online());

        fakes.clock.set(parse_local("2025-09-15 19:59").unwrap());
        assert!(storefront.is_online());
    }

    #[test]
    fn test_current_discount_follows_clock() {
        let fakes = Fakes::default();
        let storefront = fakes.storefront();

        fakes.clock.set(parse_local("2024-12-25 00:00").unwrap());
        assert_eq!(storefront.current_discount(), 0.2);

        fakes.clock.set(parse_local("2024-12-25 23:59").unwrap());
        assert_eq!(storefront.current_discount(), 0.2);

        fakes.clock.set(parse_local("2024-12-24 00:01").unwrap());
        assert_eq!(storefront.current_discount(), 0.0);

        fakes.clock.set(parse_local("2024-12-26 00:01").unwrap());
        assert_eq!(storefront.current_discount(), 0.0);
    }
}
