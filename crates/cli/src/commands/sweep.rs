//! Scenario sweep: smoke-test the mapping pipeline across every scenario.

#![allow(clippy::print_stdout)]

use hisaab_core::{Order, OrderItem, ScenarioId};
use hisaab_fbr::{FbrClient, FbrConfig, SubmissionOutcome, mapper, sanitize, validator};
use rust_decimal::Decimal;

/// Build a representative order for a scenario, nudging the optional tax
/// fields the scenario cares about.
fn sample_order(scenario: ScenarioId) -> Order {
    let mut item = OrderItem {
        product_name: Some("Sweep Widget".to_string()),
        product_description: Some("Scenario sweep sample line".to_string()),
        hs_code: Some("2710.1991".to_string()),
        uom: Some("PCS".to_string()),
        quantity: Some(Decimal::ONE),
        price: Some(Decimal::from(1000)),
        total_price: Some(Decimal::from(1000)),
        ..OrderItem::default()
    };
    if scenario.requires_withholding_tax() {
        item.extra_tax = Some(Decimal::from(25));
    }
    if scenario.requires_fed_payable() {
        item.fed_payable_tax = Some(Decimal::from(80));
    }
    if scenario.supports_third_schedule() {
        item.fixed_notified_value_or_retail_price = Some(Decimal::from(1200));
    }

    Order {
        scenario_id: Some(scenario.as_code().to_string()),
        buyer_business_name: Some("Sweep Buyer".to_string()),
        buyer_province: Some("Punjab".to_string()),
        buyer_address: Some("12 Mall Road".to_string()),
        buyer_city: Some("Lahore".to_string()),
        buyer_email: Some("sweep@example.com".to_string()),
        items: vec![item],
        ..Order::default()
    }
}

/// Run the sweep. With `submit`, each mapped invoice is also driven through
/// the sandbox validate/post protocol.
pub async fn run(submit: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = FbrConfig::from_env().ok();
    let client = if submit {
        let config = config
            .clone()
            .ok_or("sweep --submit requires FBR_BASE_URL and FBR_SANDBOX_TOKEN")?;
        Some(FbrClient::new(config))
    } else {
        None
    };
    let seller_defaults = config.map(|c| c.seller).unwrap_or_default();

    let mut failures = 0usize;
    println!("{:<8} {:<50} {:>8}  result", "code", "sale type", "rate");

    for scenario in ScenarioId::ALL {
        let order = sample_order(scenario);

        let report = validator::validate_order(&order);
        if !report.is_valid {
            failures += 1;
            println!(
                "{:<8} {:<50} {:>8}  INVALID: {}",
                scenario.as_code(),
                scenario.sale_type(),
                scenario.default_rate_label(),
                report.errors.join("; ")
            );
            continue;
        }

        let invoice = match mapper::map_order(&order, None, &seller_defaults) {
            Ok(invoice) => invoice,
            Err(err) => {
                failures += 1;
                println!(
                    "{:<8} {:<50} {:>8}  MAP ERROR: {err}",
                    scenario.as_code(),
                    scenario.sale_type(),
                    scenario.default_rate_label(),
                );
                continue;
            }
        };
        let payload = sanitize::sanitize(serde_json::to_value(&invoice)?);
        let item_count = payload
            .get("items")
            .and_then(|items| items.as_array())
            .map_or(0, Vec::len);

        let result = if let Some(client) = &client {
            match client.submit(&invoice, None).await {
                Ok(SubmissionOutcome::Posted(response)) => format!(
                    "POSTED {}",
                    response.invoice_number.unwrap_or_else(|| "-".to_string())
                ),
                Ok(SubmissionOutcome::Rejected(response)) => {
                    failures += 1;
                    format!("REJECTED: {}", response.error_messages().join("; "))
                }
                Err(err) => {
                    failures += 1;
                    format!("ERROR: {err}")
                }
            }
        } else {
            format!("ok ({item_count} items)")
        };

        println!(
            "{:<8} {:<50} {:>8}  {result}",
            scenario.as_code(),
            scenario.sale_type(),
            scenario.default_rate_label(),
        );
    }

    println!(
        "\n{} scenarios, {} failures",
        ScenarioId::ALL.len(),
        failures
    );
    if failures > 0 {
        return Err(format!("{failures} scenario(s) failed").into());
    }
    Ok(())
}
