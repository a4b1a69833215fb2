//! Internal order representation handed over by the CRUD layer.
//!
//! These structs mirror what the order-management side of the platform
//! persists. Almost every field is optional: the CRUD layer is loosely
//! typed and the FBR validator (not the type system) enforces the business
//! invariants before an order is mapped to the wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice type accepted by FBR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceType {
    #[default]
    #[serde(rename = "Sale Invoice")]
    SaleInvoice,
    #[serde(rename = "Debit Note")]
    DebitNote,
}

impl InvoiceType {
    /// The wire label sent to FBR.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SaleInvoice => "Sale Invoice",
            Self::DebitNote => "Debit Note",
        }
    }
}

impl std::fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buyer registration status with the tax authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuyerRegistrationType {
    Registered,
    #[default]
    Unregistered,
}

impl BuyerRegistrationType {
    /// The wire label sent to FBR.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "Registered",
            Self::Unregistered => "Unregistered",
        }
    }
}

/// An add-on line attached to an order item (e.g. packaging, toppings).
///
/// Addons contribute to the line total computed by the CRUD layer; the FBR
/// mapper never itemizes them separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddon {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<Decimal>,
}

/// A single order line as stored by the CRUD layer.
///
/// The per-item tax fields are caller overrides: when absent, the scenario
/// registry's defaults apply during mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    /// Harmonized System customs code (`"2710.1991"` style or bare digits).
    pub hs_code: Option<String>,
    /// Unit of measure label (`"PCS"`, `"KG"`, ...).
    pub uom: Option<String>,
    pub quantity: Option<Decimal>,
    /// Unit price excluding tax.
    pub price: Option<Decimal>,
    /// Line total excluding tax; when absent, `price * quantity` applies.
    pub total_price: Option<Decimal>,

    // Optional per-item tax overrides.
    pub tax_amount: Option<Decimal>,
    /// Percentage override, e.g. `18` for 18%.
    pub tax_percentage: Option<Decimal>,
    pub price_including_tax: Option<Decimal>,
    pub price_excluding_tax: Option<Decimal>,
    pub extra_tax: Option<Decimal>,
    pub further_tax: Option<Decimal>,
    pub fed_payable_tax: Option<Decimal>,
    pub discount: Option<Decimal>,
    /// 3rd Schedule fixed notified value / retail price.
    pub fixed_notified_value_or_retail_price: Option<Decimal>,
    /// Per-item sale-type label override.
    pub sale_type: Option<String>,

    // Weight-based quantity fields for goods sold by weight.
    pub weight_quantity: Option<Decimal>,
    pub weight_uom: Option<String>,

    #[serde(default)]
    pub addons: Vec<OrderAddon>,
}

/// An order handed over by the CRUD layer for FBR submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: Option<String>,

    // Buyer identity.
    #[serde(rename = "buyerNTNCNIC")]
    pub buyer_ntn_cnic: Option<String>,
    pub buyer_business_name: Option<String>,
    pub buyer_province: Option<String>,
    pub buyer_address: Option<String>,
    pub buyer_city: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub buyer_registration_type: Option<BuyerRegistrationType>,

    // Seller identity. When NTN or business name is present these take
    // precedence over explicitly supplied or environment-derived seller info.
    #[serde(rename = "sellerNTNCNIC")]
    pub seller_ntn_cnic: Option<String>,
    pub seller_business_name: Option<String>,
    pub seller_province: Option<String>,
    pub seller_address: Option<String>,

    /// FBR scenario code (`"SN001"`..). Required before mapping.
    pub scenario_id: Option<String>,
    pub invoice_type: Option<InvoiceType>,
    /// Reference to the original invoice; required for debit notes.
    pub invoice_ref_no: Option<String>,
    /// ISO date (`YYYY-MM-DD`); defaults to today during mapping.
    pub invoice_date: Option<String>,

    // Monetary totals maintained by the CRUD layer.
    pub subtotal: Option<Decimal>,
    pub tax_total: Option<Decimal>,
    pub total: Option<Decimal>,

    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_type_wire_labels() {
        assert_eq!(
            serde_json::to_string(&InvoiceType::SaleInvoice).unwrap(),
            "\"Sale Invoice\""
        );
        assert_eq!(
            serde_json::to_string(&InvoiceType::DebitNote).unwrap(),
            "\"Debit Note\""
        );
        let back: InvoiceType = serde_json::from_str("\"Debit Note\"").unwrap();
        assert_eq!(back, InvoiceType::DebitNote);
    }

    #[test]
    fn test_order_deserializes_from_camel_case() {
        let order: Order = serde_json::from_str(
            r#"{
                "buyerNTNCNIC": "1234567",
                "buyerBusinessName": "Test Mart",
                "scenarioId": "SN001",
                "items": [{"productName": "Widget", "quantity": 2, "price": 50}]
            }"#,
        )
        .unwrap();
        assert_eq!(order.buyer_ntn_cnic.as_deref(), Some("1234567"));
        assert_eq!(order.scenario_id.as_deref(), Some("SN001"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(
            order.items[0].quantity,
            Some(rust_decimal::Decimal::from(2))
        );
    }

    #[test]
    fn test_order_item_defaults_are_empty() {
        let item = OrderItem::default();
        assert!(item.quantity.is_none());
        assert!(item.addons.is_empty());
    }
}
