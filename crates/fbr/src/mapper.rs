//! Order to FBR invoice mapping.
//!
//! The central transformation of the integration: an [`Order`] plus its
//! items becomes a wire-format [`FbrInvoice`], with scenario-dependent tax
//! computation, field defaulting, and precision rounding applied per line.
//!
//! The functions here are pure and synchronous. The optional live
//! cross-check of the sale-type label (advisory only, never fatal) lives on
//! [`FbrClient::map_order_checked`](crate::FbrClient::map_order_checked),
//! which calls [`map_order`] first and consults the network afterwards.

use chrono::Utc;
use hisaab_core::{
    FbrPrecision, InvoiceType, Order, OrderItem, ScenarioId, format_rate, round_fbr,
};
use rust_decimal::Decimal;

use crate::FbrError;
use crate::config::SellerInfo;
use crate::invoice::{FbrInvoice, FbrItem};

/// Sales tax withheld at source: fixed 2% of the base amount, not
/// configurable per item.
const WITHHOLDING_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Known-good filler HS code used when an item carries none. Not a real
/// product code; the sandbox accepts it for any line.
pub const DEFAULT_HS_CODE: &str = "2710.1991";

/// Default unit of measure when an item carries none.
pub const DEFAULT_UOM: &str = "PCS";

/// NTN placeholder stamped on unregistered buyers. The API rejects
/// invoices without buyer identity fields even when the buyer is
/// unregistered, so they are always filled.
pub const PLACEHOLDER_BUYER_NTN: &str = "1234567890123";

/// Per-item tax amounts computed from the scenario rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTax {
    /// Line value excluding sales tax.
    pub base_amount: Decimal,
    /// Sales tax applicable to the line; always zero for exempt or
    /// zero-rated scenarios, regardless of any supplied override.
    pub sales_tax_applicable: Decimal,
    /// Withholding at source; 2% of base for withholding scenarios.
    pub sales_tax_withheld_at_source: Decimal,
    /// Federal excise duty payable; only for FED-in-ST-mode scenarios.
    pub fed_payable: Decimal,
}

/// The line value excluding sales tax: the stored line total when present,
/// otherwise unit price times quantity (quantity defaulting to one).
fn base_amount(item: &OrderItem) -> Decimal {
    item.total_price.unwrap_or_else(|| {
        item.price.unwrap_or_default() * item.quantity.unwrap_or(Decimal::ONE)
    })
}

/// The fractional tax rate for an item: the caller's percentage override
/// when supplied, otherwise the scenario's default.
fn tax_rate(item: &OrderItem, scenario: ScenarioId) -> Decimal {
    item.tax_percentage.map_or_else(
        || scenario.default_rate().as_fraction(),
        |percent| percent / Decimal::ONE_HUNDRED,
    )
}

/// Compute the tax amounts for one order line under a scenario.
#[must_use]
pub fn calculate_item_tax(item: &OrderItem, scenario: ScenarioId) -> ItemTax {
    let base = base_amount(item);

    // Exemption always wins over any supplied rate or amount.
    let sales_tax_applicable = if scenario.is_exempt_or_zero_rated() {
        Decimal::ZERO
    } else {
        base * tax_rate(item, scenario)
    };

    let sales_tax_withheld_at_source = if scenario.requires_withholding_tax() {
        base * WITHHOLDING_RATE
    } else {
        Decimal::ZERO
    };

    let fed_payable = if scenario.requires_fed_payable() {
        item.fed_payable_tax.unwrap_or_default()
    } else {
        Decimal::ZERO
    };

    ItemTax {
        base_amount: base,
        sales_tax_applicable,
        sales_tax_withheld_at_source,
        fed_payable,
    }
}

/// Take an optional override only when it is strictly positive.
///
/// An explicit zero override is indistinguishable from "not set". That
/// matches the external API's own zero-vs-absent ambiguity and is kept
/// as-is; see DESIGN.md.
fn positive_or_zero(value: Option<Decimal>) -> Decimal {
    value.filter(|v| *v > Decimal::ZERO).unwrap_or_default()
}

/// Non-empty string or a default.
fn non_empty_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => default,
    }
}

/// Map one order line to the wire format under a scenario.
#[must_use]
pub fn map_order_item(item: &OrderItem, scenario: ScenarioId) -> FbrItem {
    let tax = calculate_item_tax(item, scenario);

    let rate = item.tax_percentage.map_or_else(
        || scenario.default_rate_label().to_string(),
        |percent| format_rate(percent / Decimal::ONE_HUNDRED),
    );

    // Only 3rd Schedule scenarios carry a fixed retail price; outside them
    // the field is meaningless and stays zero even when the item has one.
    let fixed_retail_price = if scenario.supports_third_schedule() {
        positive_or_zero(item.fixed_notified_value_or_retail_price)
    } else {
        Decimal::ZERO
    };

    let description = non_empty_or(
        item.product_description.as_deref(),
        non_empty_or(item.product_name.as_deref(), "Item"),
    )
    .to_string();

    FbrItem {
        hs_code: non_empty_or(item.hs_code.as_deref(), DEFAULT_HS_CODE).to_string(),
        product_description: description,
        rate,
        uom: non_empty_or(item.uom.as_deref(), DEFAULT_UOM).to_string(),
        quantity: round_fbr(item.quantity.unwrap_or(Decimal::ONE), FbrPrecision::Quantity),
        total_values: round_fbr(
            tax.base_amount + tax.sales_tax_applicable,
            FbrPrecision::Amount,
        ),
        value_sales_excluding_st: round_fbr(tax.base_amount, FbrPrecision::Amount),
        fixed_notified_value_or_retail_price: round_fbr(fixed_retail_price, FbrPrecision::Amount),
        sales_tax_applicable: round_fbr(tax.sales_tax_applicable, FbrPrecision::Amount),
        sales_tax_withheld_at_source: round_fbr(
            tax.sales_tax_withheld_at_source,
            FbrPrecision::Amount,
        ),
        extra_tax: round_fbr(positive_or_zero(item.extra_tax), FbrPrecision::Amount),
        further_tax: round_fbr(positive_or_zero(item.further_tax), FbrPrecision::Amount),
        sro_schedule_no: String::new(),
        fed_payable: round_fbr(tax.fed_payable, FbrPrecision::Amount),
        discount: round_fbr(positive_or_zero(item.discount), FbrPrecision::Amount),
        sale_type: non_empty_or(item.sale_type.as_deref(), scenario.sale_type()).to_string(),
        sro_item_serial_no: String::new(),
    }
}

/// Resolve the seller identity for an order.
///
/// First match wins, no merging:
/// 1. order-level seller fields, if the order names an NTN or business name;
/// 2. the explicitly supplied `SellerInfo`, if any;
/// 3. the environment-derived defaults.
#[must_use]
pub fn resolve_seller(
    order: &Order,
    explicit: Option<&SellerInfo>,
    defaults: &SellerInfo,
) -> SellerInfo {
    let from_order = SellerInfo {
        ntn_cnic: order.seller_ntn_cnic.clone().unwrap_or_default(),
        business_name: order.seller_business_name.clone().unwrap_or_default(),
        province: order.seller_province.clone().unwrap_or_default(),
        address: order.seller_address.clone().unwrap_or_default(),
    };
    if from_order.is_identified() {
        return from_order;
    }
    if let Some(seller) = explicit {
        return seller.clone();
    }
    defaults.clone()
}

/// Buyer address: address and city concatenated, with a safe filler when
/// the order carries neither.
fn buyer_address(order: &Order) -> String {
    let parts: Vec<&str> = [order.buyer_address.as_deref(), order.buyer_city.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        "Pakistan".to_string()
    } else {
        parts.join(", ")
    }
}

/// Map an order to a wire-format invoice.
///
/// Hard preconditions, checked before anything is built: the order must
/// carry a scenario id and at least one item. These fail with
/// [`FbrError::Precondition`]; softer business rules belong to
/// [`validate_order`](crate::validator::validate_order).
///
/// Buyer fields are always filled, even for unregistered buyers: the API
/// has been observed to reject invoices lacking them.
///
/// # Errors
///
/// Returns [`FbrError::Precondition`] when the scenario id is missing or
/// the order has no items.
pub fn map_order(
    order: &Order,
    seller_override: Option<&SellerInfo>,
    seller_defaults: &SellerInfo,
) -> Result<FbrInvoice, FbrError> {
    let scenario_code = order
        .scenario_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            FbrError::Precondition("order has no scenario id; cannot map to FBR invoice".to_string())
        })?;
    if order.items.is_empty() {
        return Err(FbrError::Precondition(
            "order has no items; cannot map to FBR invoice".to_string(),
        ));
    }

    let scenario = ScenarioId::parse_lenient(scenario_code);
    let seller = resolve_seller(order, seller_override, seller_defaults);
    let invoice_type = order.invoice_type.unwrap_or_default();

    // invoiceRefNo must be present even when empty; populated only for
    // debit notes.
    let invoice_ref_no = if invoice_type == InvoiceType::DebitNote {
        order.invoice_ref_no.clone().unwrap_or_default()
    } else {
        String::new()
    };

    let invoice_date = order
        .invoice_date
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

    let registration_type = order.buyer_registration_type.unwrap_or_default();

    Ok(FbrInvoice {
        invoice_type: invoice_type.as_str().to_string(),
        invoice_date,
        seller_ntn_cnic: seller.ntn_cnic,
        seller_business_name: seller.business_name,
        seller_province: seller.province,
        seller_address: seller.address,
        buyer_ntn_cnic: non_empty_or(order.buyer_ntn_cnic.as_deref(), PLACEHOLDER_BUYER_NTN)
            .to_string(),
        buyer_business_name: non_empty_or(order.buyer_business_name.as_deref(), "Walk-in Customer")
            .to_string(),
        buyer_province: non_empty_or(order.buyer_province.as_deref(), "Punjab").to_string(),
        buyer_address: buyer_address(order),
        buyer_registration_type: registration_type.as_str().to_string(),
        invoice_ref_no,
        scenario_id: scenario.as_code().to_string(),
        items: order
            .items
            .iter()
            .map(|item| map_order_item(item, scenario))
            .collect(),
    })
}
