//! # storefront-core: Pure Business Rules
//!
//! This crate holds every storefront rule as a pure function of its inputs
//! plus, at most, an externally supplied time.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Rules Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │              storefront-services (I/O edge)                     │    │
//! │  │   price_in_currency, shipping_info, submit_order, sign_up, ...  │    │
//! │  │   rules.toml loading, system clock, rulecheck binary            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐    │    │
//! │  │   │  rules   │  │ schedule │  │  input   │  │  validation  │    │    │
//! │  │   │ RuleBook │  │ Calendar │  │  JSON    │  │  primitives  │    │    │
//! │  │   │ coupons  │  │  Clock   │  │  guards  │  │  ranges/len  │    │    │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO SYSTEM CLOCK • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Coupon, ValidationReport, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Primitive range and length checks
//! - [`config`] - Rules configuration (parsed from TOML text)
//! - [`rules`] - The `RuleBook` evaluator
//! - [`schedule`] - Business hours and holiday promotion
//! - [`input`] - Type-guarded entry points for JSON values
//! - [`basics`] - Small numeric helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Money, RuleBook};
//!
//! let book = RuleBook::default();
//!
//! let price = Money::from_major_minor(10, 0);
//! assert_eq!(book.calculate_discount(price, "SAVE20").unwrap().cents(), 800);
//!
//! let report = book.validate_user_input("ad", 101);
//! assert_eq!(report.to_string(), "Invalid: Invalid username, Invalid age");
//!
//! assert!(book.can_drive(16, "US").unwrap());
//! assert!(book.can_drive(18, "NGN").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basics;
pub mod config;
pub mod error;
pub mod input;
pub mod money;
pub mod rules;
pub mod schedule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::RulesConfig;
pub use error::{ConfigError, RuleError, ValidationError};
pub use money::Money;
pub use rules::RuleBook;
pub use schedule::{Clock, FixedClock, StoreCalendar};
pub use types::*;
