//! Pre-flight order validation.
//!
//! Runs before any network call and accumulates every violation instead of
//! short-circuiting, so the caller can surface the complete list at once.
//! Validation failures are values, never errors; whether to proceed is the
//! caller's decision.

use hisaab_core::{BuyerRegistrationType, InvoiceType, Order, ScenarioId};
use rust_decimal::Decimal;

/// Outcome of [`validate_order`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// HS code shape: `DDDD.DDDD` or 8-10 bare digits.
fn is_valid_hs_code(code: &str) -> bool {
    if let Some((head, tail)) = code.split_once('.') {
        return head.len() == 4
            && tail.len() == 4
            && head.chars().all(|c| c.is_ascii_digit())
            && tail.chars().all(|c| c.is_ascii_digit());
    }
    (8..=10).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit())
}

/// Validate an order for FBR submission.
///
/// Pure and synchronous. Structural and business-rule checks accumulate
/// into the report; the only side channel is a non-fatal warning logged
/// when a withholding-tax scenario carries no item with `extra_tax > 0`,
/// which is informational and never blocks submission.
#[must_use]
pub fn validate_order(order: &Order) -> ValidationReport {
    let mut errors = Vec::new();

    let scenario_code = order
        .scenario_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if scenario_code.is_none() {
        errors.push("Order has no FBR scenario id".to_string());
    }

    if order.items.is_empty() {
        errors.push("Order has no items".to_string());
    }

    if order
        .buyer_email
        .as_deref()
        .is_none_or(|e| e.trim().is_empty())
    {
        errors.push("Buyer email is missing".to_string());
    }

    for (index, item) in order.items.iter().enumerate() {
        let line = index + 1;
        if item
            .product_name
            .as_deref()
            .is_none_or(|n| n.trim().is_empty())
        {
            errors.push(format!("Item {line}: product name is missing"));
        }
        if item.quantity.unwrap_or_default() <= Decimal::ZERO {
            errors.push(format!("Item {line}: quantity must be greater than zero"));
        }
        if item.price.unwrap_or_default() <= Decimal::ZERO {
            errors.push(format!("Item {line}: price must be greater than zero"));
        }
        if let Some(hs_code) = item.hs_code.as_deref().map(str::trim)
            && !hs_code.is_empty()
            && !is_valid_hs_code(hs_code)
        {
            errors.push(format!(
                "Item {line}: HS code '{hs_code}' must be DDDD.DDDD or 8-10 digits"
            ));
        }
    }

    if order.invoice_type == Some(InvoiceType::DebitNote)
        && order
            .invoice_ref_no
            .as_deref()
            .is_none_or(|r| r.trim().is_empty())
    {
        errors.push("Debit Note requires an invoice reference number".to_string());
    }

    if order.buyer_registration_type == Some(BuyerRegistrationType::Registered)
        && order
            .buyer_ntn_cnic
            .as_deref()
            .is_none_or(|n| n.trim().is_empty())
    {
        errors.push("Registered buyer requires a buyer NTN/CNIC".to_string());
    }

    // Informational only: withholding scenarios usually carry extra tax on
    // at least one line, but its absence must not block submission.
    if let Some(code) = scenario_code {
        let scenario = ScenarioId::parse_lenient(code);
        if scenario.requires_withholding_tax()
            && !order
                .items
                .iter()
                .any(|item| item.extra_tax.unwrap_or_default() > Decimal::ZERO)
        {
            tracing::warn!(
                scenario = %scenario,
                "withholding-tax scenario has no item with extra tax; submitting anyway"
            );
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hisaab_core::OrderItem;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn valid_item() -> OrderItem {
        OrderItem {
            product_name: Some("Widget".to_string()),
            quantity: Some(Decimal::ONE),
            price: Some(dec("100")),
            ..OrderItem::default()
        }
    }

    fn valid_order() -> Order {
        Order {
            scenario_id: Some("SN001".to_string()),
            buyer_email: Some("buyer@example.com".to_string()),
            items: vec![valid_item()],
            ..Order::default()
        }
    }

    #[test]
    fn test_minimal_valid_order_passes() {
        let report = validate_order(&valid_order());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_errors_accumulate_instead_of_short_circuiting() {
        let order = Order::default();
        let report = validate_order(&order);
        assert!(!report.is_valid);
        // Missing scenario, no items, and missing email all reported together.
        assert!(report.errors.len() >= 3);
    }

    #[test]
    fn test_missing_scenario_id() {
        let mut order = valid_order();
        order.scenario_id = Some("   ".to_string());
        let report = validate_order(&order);
        assert!(report.errors.iter().any(|e| e.contains("scenario")));
    }

    #[test]
    fn test_item_quantity_and_price_must_be_positive() {
        let mut order = valid_order();
        order.items = vec![OrderItem {
            product_name: Some("Widget".to_string()),
            quantity: Some(Decimal::ZERO),
            price: Some(dec("-1")),
            ..OrderItem::default()
        }];
        let report = validate_order(&order);
        assert!(report.errors.iter().any(|e| e.contains("quantity")));
        assert!(report.errors.iter().any(|e| e.contains("price")));
    }

    #[test]
    fn test_hs_code_shapes() {
        assert!(is_valid_hs_code("2710.1991"));
        assert!(is_valid_hs_code("27101991"));
        assert!(is_valid_hs_code("2710199100"));
        assert!(!is_valid_hs_code("271.1991"));
        assert!(!is_valid_hs_code("2710.19"));
        assert!(!is_valid_hs_code("abcd.efgh"));
        assert!(!is_valid_hs_code("1234567"));
        assert!(!is_valid_hs_code("12345678901"));
    }

    #[test]
    fn test_invalid_hs_code_is_reported() {
        let mut order = valid_order();
        order.items[0].hs_code = Some("27-10".to_string());
        let report = validate_order(&order);
        assert!(report.errors.iter().any(|e| e.contains("HS code")));
    }

    #[test]
    fn test_absent_hs_code_is_fine() {
        // The mapper fills a known-good default, so absence is not an error.
        let report = validate_order(&valid_order());
        assert!(report.is_valid);
    }

    #[test]
    fn test_debit_note_requires_reference_number() {
        let mut order = valid_order();
        order.invoice_type = Some(hisaab_core::InvoiceType::DebitNote);
        let report = validate_order(&order);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("reference number")));

        order.invoice_ref_no = Some("INV-001".to_string());
        assert!(validate_order(&order).is_valid);
    }

    #[test]
    fn test_registered_buyer_requires_ntn() {
        let mut order = valid_order();
        order.buyer_registration_type = Some(BuyerRegistrationType::Registered);
        let report = validate_order(&order);
        assert!(report.errors.iter().any(|e| e.contains("NTN")));

        order.buyer_ntn_cnic = Some("1234567".to_string());
        assert!(validate_order(&order).is_valid);
    }

    #[test]
    fn test_withholding_scenario_without_extra_tax_stays_valid() {
        let mut order = valid_order();
        order.scenario_id = Some("SN002".to_string());
        // Warn-only: the report must still be valid.
        assert!(validate_order(&order).is_valid);
    }
}
