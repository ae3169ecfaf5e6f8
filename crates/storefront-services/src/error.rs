//! # Service Error Types
//!
//! Error types for the collaborator-driven services.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Service Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │     Rules       │  │  Collaborators  │  │     Configuration       │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │  Rule           │  │  Collaborator   │  │  Config (parse/invalid) │  │
//! │  │  (RuleError)    │  │  (rates, mail,  │  │  ConfigLoadFailed       │  │
//! │  │                 │  │   payments)     │  │  Io                     │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{ConfigError, RuleError};
use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error type covering rule, collaborator and config failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    // =========================================================================
    // Rule Errors
    // =========================================================================
    /// A core rule rejected its input.
    #[error(transparent)]
    Rule(#[from] RuleError),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    /// An external collaborator failed (transport, timeout, bad response).
    #[error("{service} failed: {message}")]
    Collaborator { service: String, message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Rules config was read but is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rules config could not be located or written.
    #[error("Failed to load rules config: {0}")]
    ConfigLoadFailed(String),

    /// File system error while reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Shorthand for a collaborator failure.
    pub fn collaborator(service: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Collaborator {
            service: service.into(),
            message: message.into(),
        }
    }
}
