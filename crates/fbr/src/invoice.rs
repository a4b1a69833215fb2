//! FBR wire-format invoice types.
//!
//! Field names and casing are mandated by the Digital Invoicing API and
//! must match exactly (`uoM`, not `uom`; `valueSalesExcludingST`, not
//! `valueSalesExcludingSt`). Monetary fields serialize as JSON numbers,
//! rounded to two decimal places (four for quantity) by the mapper before
//! they reach this layer.
//!
//! Presence rules the API enforces:
//! - `discount`, `fedPayable`, `extraTax`, `furtherTax`,
//!   `salesTaxWithheldAtSource`, and `fixedNotifiedValueOrRetailPrice` must
//!   be present even when zero, so they are plain fields here.
//! - `invoiceRefNo`, `sroScheduleNo`, and `sroItemSerialNo` must be present
//!   even when empty, so they are plain `String`s.
//! - Every other empty field must be omitted entirely; that policy is
//!   applied by [`sanitize`](crate::sanitize::sanitize) on the serialized
//!   value, not encoded in these types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single invoice line in FBR wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbrItem {
    #[serde(rename = "hsCode")]
    pub hs_code: String,
    #[serde(rename = "productDescription")]
    pub product_description: String,
    /// Rate label, e.g. `"18%"` or `"Exempt"`.
    pub rate: String,
    #[serde(rename = "uoM")]
    pub uom: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(rename = "totalValues", with = "rust_decimal::serde::float")]
    pub total_values: Decimal,
    #[serde(rename = "valueSalesExcludingST", with = "rust_decimal::serde::float")]
    pub value_sales_excluding_st: Decimal,
    #[serde(
        rename = "fixedNotifiedValueOrRetailPrice",
        with = "rust_decimal::serde::float"
    )]
    pub fixed_notified_value_or_retail_price: Decimal,
    #[serde(rename = "salesTaxApplicable", with = "rust_decimal::serde::float")]
    pub sales_tax_applicable: Decimal,
    #[serde(rename = "salesTaxWithheldAtSource", with = "rust_decimal::serde::float")]
    pub sales_tax_withheld_at_source: Decimal,
    #[serde(rename = "extraTax", with = "rust_decimal::serde::float")]
    pub extra_tax: Decimal,
    #[serde(rename = "furtherTax", with = "rust_decimal::serde::float")]
    pub further_tax: Decimal,
    #[serde(rename = "sroScheduleNo")]
    pub sro_schedule_no: String,
    #[serde(rename = "fedPayable", with = "rust_decimal::serde::float")]
    pub fed_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(rename = "saleType")]
    pub sale_type: String,
    #[serde(rename = "sroItemSerialNo")]
    pub sro_item_serial_no: String,
}

/// A complete invoice in FBR wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbrInvoice {
    #[serde(rename = "invoiceType")]
    pub invoice_type: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(rename = "invoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "sellerNTNCNIC")]
    pub seller_ntn_cnic: String,
    #[serde(rename = "sellerBusinessName")]
    pub seller_business_name: String,
    #[serde(rename = "sellerProvince")]
    pub seller_province: String,
    #[serde(rename = "sellerAddress")]
    pub seller_address: String,
    #[serde(rename = "buyerNTNCNIC")]
    pub buyer_ntn_cnic: String,
    #[serde(rename = "buyerBusinessName")]
    pub buyer_business_name: String,
    #[serde(rename = "buyerProvince")]
    pub buyer_province: String,
    #[serde(rename = "buyerAddress")]
    pub buyer_address: String,
    #[serde(rename = "buyerRegistrationType")]
    pub buyer_registration_type: String,
    /// Reference to the original invoice; empty unless this is a debit note.
    #[serde(rename = "invoiceRefNo")]
    pub invoice_ref_no: String,
    #[serde(rename = "scenarioId")]
    pub scenario_id: String,
    pub items: Vec<FbrItem>,
}

/// Response body of `validateinvoicedata_sb` and `postinvoicedata_sb`.
///
/// Every field is optional: the sandbox is inconsistent about which parts
/// of the envelope it populates, and occasionally returns malformed JSON
/// that only parses after [`repair_json`](crate::sanitize::repair_json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FbrSubmissionResponse {
    /// FBR-assigned invoice number, present on a successful post.
    #[serde(rename = "invoiceNumber", default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub dated: Option<String>,
    #[serde(rename = "validationResponse", default)]
    pub validation_response: Option<FbrValidationStatus>,
}

impl FbrSubmissionResponse {
    /// Whether the remote validation judged the invoice valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_response
            .as_ref()
            .and_then(|v| v.status.as_deref())
            .is_some_and(|s| s.eq_ignore_ascii_case("valid"))
    }

    /// All error messages, envelope-level first, then per-item detail.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(validation) = &self.validation_response {
            if let Some(error) = validation.error.as_deref()
                && !error.is_empty()
            {
                messages.push(error.to_string());
            }
            for item in validation.invoice_statuses.iter().flatten() {
                if let Some(error) = item.error.as_deref()
                    && !error.is_empty()
                {
                    messages.push(error.to_string());
                }
            }
        }
        messages
    }
}

/// The `validationResponse` envelope nested in a submission response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FbrValidationStatus {
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<String>,
    /// `"Valid"` or `"Invalid"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "invoiceStatuses", default)]
    pub invoice_statuses: Option<Vec<FbrItemStatus>>,
}

/// Per-item status nested in `invoiceStatuses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FbrItemStatus {
    #[serde(rename = "itemSNo", default)]
    pub item_s_no: Option<String>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "invoiceNo", default)]
    pub invoice_no: Option<String>,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
