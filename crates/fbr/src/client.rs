//! HTTP client for the FBR Digital Invoicing sandbox.
//!
//! Both submission endpoints follow the same defensive pattern: sanitize
//! the outbound payload, POST with bearer auth, read the raw response text
//! (never assume valid JSON), repair known malformed-JSON patterns, then
//! parse. Transport and parse failures are wrapped and rethrown with
//! context; a remote `"Invalid"` verdict is a normal return value the
//! caller inspects.
//!
//! No retries, no batching, no shared mutable state: each call is a
//! single-shot request, and concurrent submissions need no coordination.

use chrono::{NaiveDate, Utc};
use hisaab_core::{Order, parse_rate};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::FbrError;
use crate::config::{ConfigError, FbrConfig, SellerInfo};
use crate::invoice::{FbrInvoice, FbrSubmissionResponse};
use crate::mapper::map_order;
use crate::sanitize::{repair_json, sanitize};

/// Remote pre-flight validation endpoint.
const VALIDATE_PATH: &str = "validateinvoicedata_sb";
/// Final submission endpoint.
const POST_PATH: &str = "postinvoicedata_sb";

/// Transaction type id for the sale-type rate lookup (sales invoices).
const TRANS_TYPE_ID: u32 = 18;
/// Origination supplier flag for the sale-type rate lookup.
const ORIGINATION_SUPPLIER: u32 = 1;

/// Outcome of the two-phase validate-then-post protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Remote validation passed and the invoice was posted.
    Posted(FbrSubmissionResponse),
    /// Remote validation failed; the invoice was never posted. Per-item
    /// detail is in `error_messages()`.
    Rejected(FbrSubmissionResponse),
}

/// Result of a best-effort connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Base URL and token are present and well-formed.
    pub config_valid: bool,
    /// The auxiliary rate-lookup endpoint answered.
    pub reachable: bool,
}

/// One row of the `SaleTypeToRate` reference table.
///
/// The upstream field casing (`ratE_ID`) is the API's, not a typo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SaleTypeRate {
    #[serde(rename = "ratE_ID", default)]
    pub rate_id: Option<i64>,
    #[serde(rename = "ratE_DESC", default)]
    pub rate_desc: Option<String>,
    #[serde(rename = "ratE_VALUE", default)]
    pub rate_value: Option<Decimal>,
}

/// Client for the FBR Digital Invoicing API.
#[derive(Debug, Clone)]
pub struct FbrClient {
    client: reqwest::Client,
    config: FbrConfig,
}

impl FbrClient {
    /// Create a new client over the given configuration.
    #[must_use]
    pub fn new(config: FbrConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &FbrConfig {
        &self.config
    }

    /// Check configuration validity without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Root URL for the reference-data endpoints, which live outside the
    /// `/di_data/v1/di` prefix of the submission endpoints.
    fn pdi_root(&self) -> String {
        let trimmed = self.config.base_url.trim_end_matches('/');
        trimmed
            .strip_suffix("/di_data/v1/di")
            .unwrap_or(trimmed)
            .to_string()
    }

    /// Shared submission path: sanitize, POST, read text, repair, parse.
    async fn post_payload(
        &self,
        path: &str,
        invoice: &FbrInvoice,
        token_override: Option<&SecretString>,
    ) -> Result<FbrSubmissionResponse, FbrError> {
        self.config.validate()?;

        let payload = serde_json::to_value(invoice)
            .map(sanitize)
            .map_err(|e| FbrError::Parse(format!("failed to serialize invoice: {e}")))?;
        let token = token_override.unwrap_or(&self.config.sandbox_token);

        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(token.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(endpoint = path, status = status.as_u16(), "FBR request failed");
            return Err(FbrError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let repaired = repair_json(&text);
        let parsed: FbrSubmissionResponse = serde_json::from_str(&repaired).map_err(|e| {
            tracing::error!(endpoint = path, error = %e, "FBR response unparseable after repair");
            FbrError::Parse(format!(
                "{path} response was not valid JSON even after repair: {e}; body: {text}"
            ))
        })?;

        tracing::info!(
            endpoint = path,
            valid = parsed.is_valid(),
            invoice_number = parsed.invoice_number.as_deref(),
            "FBR response received"
        );
        Ok(parsed)
    }

    /// Run remote pre-flight validation of an invoice.
    ///
    /// A remote `"Invalid"` verdict comes back as a normal response, not an
    /// error; inspect [`FbrSubmissionResponse::is_valid`].
    ///
    /// # Errors
    ///
    /// Configuration, transport, and unrecoverable-parse failures.
    pub async fn validate_invoice(
        &self,
        invoice: &FbrInvoice,
        token_override: Option<&SecretString>,
    ) -> Result<FbrSubmissionResponse, FbrError> {
        self.post_payload(VALIDATE_PATH, invoice, token_override).await
    }

    /// Post an invoice for final submission.
    ///
    /// # Errors
    ///
    /// Configuration, transport, and unrecoverable-parse failures.
    pub async fn post_invoice(
        &self,
        invoice: &FbrInvoice,
        token_override: Option<&SecretString>,
    ) -> Result<FbrSubmissionResponse, FbrError> {
        self.post_payload(POST_PATH, invoice, token_override).await
    }

    /// Drive the full two-phase protocol: validate, then post only when the
    /// remote verdict is valid.
    ///
    /// # Errors
    ///
    /// Configuration, transport, and unrecoverable-parse failures from
    /// either phase. A rejection is an `Ok(SubmissionOutcome::Rejected)`.
    pub async fn submit(
        &self,
        invoice: &FbrInvoice,
        token_override: Option<&SecretString>,
    ) -> Result<SubmissionOutcome, FbrError> {
        let validation = self.validate_invoice(invoice, token_override).await?;
        if !validation.is_valid() {
            tracing::warn!(
                errors = ?validation.error_messages(),
                "FBR validation rejected invoice; not posting"
            );
            return Ok(SubmissionOutcome::Rejected(validation));
        }
        let posted = self.post_invoice(invoice, token_override).await?;
        Ok(SubmissionOutcome::Posted(posted))
    }

    /// Fetch the `SaleTypeToRate` reference table for a date.
    ///
    /// Advisory data only; the one caller discards the error variant.
    ///
    /// # Errors
    ///
    /// Configuration, transport, and parse failures.
    pub async fn sale_type_to_rate(
        &self,
        date: NaiveDate,
        token_override: Option<&SecretString>,
    ) -> Result<Vec<SaleTypeRate>, FbrError> {
        self.config.validate()?;
        let token = token_override.unwrap_or(&self.config.sandbox_token);
        let url = format!("{}/pdi/v2/SaleTypeToRate", self.pdi_root());

        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .query(&[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("transTypeId", TRANS_TYPE_ID.to_string()),
                ("originationSupplier", ORIGINATION_SUPPLIER.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(FbrError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&repair_json(&text))
            .map_err(|e| FbrError::Parse(format!("SaleTypeToRate response unparseable: {e}")))
    }

    /// Map an order to a wire invoice, cross-checking the rate labels
    /// against the live `SaleTypeToRate` table.
    ///
    /// The cross-check is advisory: the lookup's error variant is discarded
    /// here, its single call site, because liveness of the reference
    /// endpoint is not guaranteed and the local registry is authoritative
    /// enough to file with.
    ///
    /// # Errors
    ///
    /// Only the mapper's precondition failures; never the lookup's.
    pub async fn map_order_checked(
        &self,
        order: &Order,
        seller_override: Option<&SellerInfo>,
    ) -> Result<FbrInvoice, FbrError> {
        let invoice = map_order(order, seller_override, &self.config.seller)?;

        let date = NaiveDate::parse_from_str(&invoice.invoice_date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        match self.sale_type_to_rate(date, None).await {
            Ok(rates) => {
                for item in &invoice.items {
                    let fraction = parse_rate(&item.rate) * Decimal::ONE_HUNDRED;
                    let known = rates
                        .iter()
                        .any(|row| row.rate_value == Some(fraction.normalize()));
                    if known {
                        tracing::debug!(rate = %item.rate, "rate label confirmed by live table");
                    } else {
                        tracing::warn!(
                            rate = %item.rate,
                            sale_type = %item.sale_type,
                            "rate label not in live SaleTypeToRate table; using local registry"
                        );
                    }
                }
            }
            Err(err) => {
                // Advisory only: fall back to the local mapping.
                tracing::warn!(error = %err, "SaleTypeToRate lookup failed; using local registry");
            }
        }

        Ok(invoice)
    }

    /// Best-effort health check: configuration validity plus a tolerated
    /// probe of the rate-lookup endpoint.
    pub async fn test_connection(&self) -> ConnectionStatus {
        let config_valid = self.config.validate().is_ok();
        let reachable = if config_valid {
            self.sale_type_to_rate(Utc::now().date_naive(), None)
                .await
                .is_ok()
        } else {
            false
        };
        ConnectionStatus {
            config_valid,
            reachable,
        }
    }
}
