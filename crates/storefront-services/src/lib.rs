//! # Storefront Services
//!
//! The collaborator-driven half of the storefront: currency conversion,
//! shipping, analytics, payments and account emails, plus config loading.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       storefront-services                               │
//! │                                                                         │
//! │   rulecheck (bin) ──► config::load ──► RuleBook (storefront-core)       │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                       Storefront                        │
//! │                                            │                            │
//! │            ┌───────────────┬───────────────┼───────────────┐            │
//! │            ▼               ▼               ▼               ▼            │
//! │      ExchangeRates   ShippingQuotes   PaymentGateway     Mailer         │
//! │                                                      SecurityCodes      │
//! │      Analytics                Clock                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every collaborator is a `Send + Sync` trait object, so tests wire in
//! recording fakes and production wires in real clients.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod storefront;

pub use collaborators::{
    Analytics, ExchangeRates, Mailer, NoOpAnalytics, PaymentGateway, SecurityCodes,
    ShippingQuotes, SystemClock, UuidSecurityCodes,
};
pub use error::{ServiceError, ServiceResult};
pub use storefront::{Collaborators, Storefront};
