//! FBR client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FBR_BASE_URL` - Base URL of the Digital Invoicing API
//!   (e.g. `https://gw.fbr.gov.pk/di_data/v1/di`)
//! - `FBR_SANDBOX_TOKEN` - Bearer token for the sandbox endpoints
//!
//! ## Optional (fallback seller identity)
//! - `FBR_SELLER_NTNCNIC` - Seller NTN or CNIC
//! - `FBR_SELLER_BUSINESS_NAME` - Registered business name
//! - `FBR_SELLER_PROVINCE` - Province of registration
//! - `FBR_SELLER_ADDRESS` - Registered address
//!
//! The configuration is constructed once at process start and passed by
//! reference into [`FbrClient`](crate::FbrClient); per-order and per-tenant
//! overrides (seller identity, bearer token) are accepted as explicit call
//! parameters and take precedence over these defaults.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors that can occur during loading or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration {0}: {1}")]
    InvalidConfig(String, String),
}

/// Seller identity stamped onto outgoing invoices.
///
/// Resolution order during mapping: order-level seller fields, then an
/// explicitly supplied `SellerInfo`, then these environment-derived
/// defaults. First match wins; fields are never merged across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SellerInfo {
    /// Seller NTN or CNIC.
    pub ntn_cnic: String,
    /// Registered business name.
    pub business_name: String,
    /// Province of registration.
    pub province: String,
    /// Registered address.
    pub address: String,
}

impl SellerInfo {
    /// Whether this identity carries an NTN or a business name.
    #[must_use]
    pub fn is_identified(&self) -> bool {
        !self.ntn_cnic.trim().is_empty() || !self.business_name.trim().is_empty()
    }
}

/// FBR Digital Invoicing configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct FbrConfig {
    /// Base URL for the Digital Invoicing endpoints.
    pub base_url: String,
    /// Sandbox bearer token (process-wide default; per-call overrides allowed).
    pub sandbox_token: SecretString,
    /// Environment-derived fallback seller identity.
    pub seller: SellerInfo,
}

impl std::fmt::Debug for FbrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FbrConfig")
            .field("base_url", &self.base_url)
            .field("sandbox_token", &"[REDACTED]")
            .field("seller", &self.seller)
            .finish()
    }
}

impl FbrConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            base_url: get_required_env("FBR_BASE_URL")?,
            sandbox_token: SecretString::from(get_required_env("FBR_SANDBOX_TOKEN")?),
            seller: SellerInfo {
                ntn_cnic: get_env_or_default("FBR_SELLER_NTNCNIC", ""),
                business_name: get_env_or_default("FBR_SELLER_BUSINESS_NAME", ""),
                province: get_env_or_default("FBR_SELLER_PROVINCE", ""),
                address: get_env_or_default("FBR_SELLER_ADDRESS", ""),
            },
        })
    }

    /// Check that the configuration is usable: base URL and token non-empty,
    /// URL starts with `http`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "FBR_BASE_URL".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidConfig(
                "FBR_BASE_URL".to_string(),
                format!("must start with http, got {}", self.base_url),
            ));
        }
        if self.sandbox_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "FBR_SANDBOX_TOKEN".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> FbrConfig {
        FbrConfig {
            base_url: "https://gw.fbr.gov.pk/di_data/v1/di".to_string(),
            sandbox_token: SecretString::from("sandbox-token-value"),
            seller: SellerInfo {
                ntn_cnic: "1234567".to_string(),
                business_name: "Hisaab Traders".to_string(),
                province: "Punjab".to_string(),
                address: "Lahore".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = test_config();
        config.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = test_config();
        config.base_url = "ftp://gw.fbr.gov.pk".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let mut config = test_config();
        config.sandbox_token = SecretString::from("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug_output = format!("{:?}", test_config());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sandbox-token-value"));
    }

    #[test]
    fn test_seller_info_is_identified() {
        assert!(test_config().seller.is_identified());
        assert!(!SellerInfo::default().is_identified());
        let ntn_only = SellerInfo {
            ntn_cnic: "1234567".to_string(),
            ..SellerInfo::default()
        };
        assert!(ntn_only.is_identified());
    }
}
