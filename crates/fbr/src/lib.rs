//! FBR Digital Invoicing integration.
//!
//! Translates the platform's loosely-typed [`Order`](hisaab_core::Order)
//! representation into the strictly-typed invoice format mandated by
//! Pakistan's Federal Board of Revenue, applies the per-scenario tax rules,
//! and drives the two-phase validate-then-post protocol against the FBR
//! sandbox API.
//!
//! # Pipeline
//!
//! ```text
//! Order -> validator::validate_order
//!       -> mapper::map_order            (scenario rules, tax computation)
//!       -> sanitize::sanitize           (null/zero/empty field policy)
//!       -> FbrClient::validate_invoice  (remote pre-flight)
//!       -> FbrClient::post_invoice      (only when remote says Valid)
//! ```
//!
//! Every call maps and validates its own input and allocates fresh output;
//! there is no shared mutable state, and retry policy is the caller's
//! responsibility.
//!
//! # Example
//!
//! ```rust,ignore
//! use hisaab_fbr::{FbrClient, FbrConfig, mapper, validator};
//!
//! let config = FbrConfig::from_env()?;
//! let client = FbrClient::new(config);
//!
//! let report = validator::validate_order(&order);
//! if !report.is_valid {
//!     return Err(report.errors.join("; ").into());
//! }
//!
//! let invoice = client.map_order_checked(&order, None).await?;
//! let outcome = client.submit(&invoice, None).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod invoice;
pub mod mapper;
pub mod sanitize;
pub mod validator;

pub use client::{ConnectionStatus, FbrClient, SubmissionOutcome};
pub use config::{ConfigError, FbrConfig, SellerInfo};
pub use invoice::{FbrInvoice, FbrItem, FbrSubmissionResponse};
pub use validator::ValidationReport;

use thiserror::Error;

/// Errors surfaced by the FBR integration.
///
/// Business-rule violations are *not* errors: they come back as a
/// [`ValidationReport`] (local) or an `"Invalid"` submission response
/// (remote), both of which the caller inspects as ordinary values.
#[derive(Debug, Error)]
pub enum FbrError {
    /// Configuration is missing or malformed; raised before any network call.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A hard precondition of the mapper failed (missing scenario, no items).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("FBR API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed, even after JSON repair.
    #[error("Parse error: {0}")]
    Parse(String),
}
