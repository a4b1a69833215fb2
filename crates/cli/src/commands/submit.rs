//! Submit a single order from a JSON file.

#![allow(clippy::print_stdout)]

use std::path::Path;

use hisaab_core::Order;
use hisaab_fbr::{FbrClient, FbrConfig, SubmissionOutcome, validator};

/// Run the full pipeline for one order: validate locally, map with the
/// live sale-type cross-check, then drive validate/post on the sandbox.
pub async fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let order: Order = serde_json::from_str(&raw)?;

    let report = validator::validate_order(&order);
    if !report.is_valid {
        for error in &report.errors {
            println!("invalid: {error}");
        }
        return Err(format!("order failed local validation with {} error(s)", report.errors.len()).into());
    }

    let config = FbrConfig::from_env()?;
    let client = FbrClient::new(config);

    let invoice = client.map_order_checked(&order, None).await?;
    match client.submit(&invoice, None).await? {
        SubmissionOutcome::Posted(response) => {
            println!(
                "posted: invoice number {}",
                response.invoice_number.as_deref().unwrap_or("<none>")
            );
        }
        SubmissionOutcome::Rejected(response) => {
            for error in response.error_messages() {
                println!("rejected: {error}");
            }
            return Err("FBR validation rejected the invoice".into());
        }
    }
    Ok(())
}
