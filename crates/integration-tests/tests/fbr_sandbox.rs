//! Live tests against the FBR sandbox.
//!
//! These tests require:
//! - `FBR_BASE_URL` pointing at the Digital Invoicing sandbox
//! - `FBR_SANDBOX_TOKEN` with a valid sandbox bearer token
//! - `FBR_SELLER_*` variables for a registered sandbox seller
//!
//! Run with: cargo test -p hisaab-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use hisaab_core::{Order, OrderItem};
use hisaab_fbr::{FbrClient, FbrConfig, SubmissionOutcome};
use rust_decimal::Decimal;

fn sandbox_client() -> FbrClient {
    let config = FbrConfig::from_env().expect("FBR sandbox environment not configured");
    config.validate().expect("FBR configuration is invalid");
    FbrClient::new(config)
}

fn standard_rate_order() -> Order {
    Order {
        scenario_id: Some("SN001".to_string()),
        buyer_business_name: Some("Sandbox Buyer".to_string()),
        buyer_email: Some("sandbox@example.com".to_string()),
        buyer_province: Some("Punjab".to_string()),
        buyer_address: Some("1 Test Lane".to_string()),
        buyer_city: Some("Lahore".to_string()),
        items: vec![OrderItem {
            product_name: Some("Sandbox Widget".to_string()),
            hs_code: Some("2710.1991".to_string()),
            quantity: Some(Decimal::ONE),
            price: Some(Decimal::from(1000)),
            total_price: Some(Decimal::from(1000)),
            ..OrderItem::default()
        }],
        ..Order::default()
    }
}

#[tokio::test]
#[ignore = "Requires FBR sandbox credentials"]
async fn test_sandbox_connection() {
    let client = sandbox_client();
    let status = client.test_connection().await;
    assert!(status.config_valid);
    assert!(status.reachable, "sandbox did not answer the rate lookup");
}

#[tokio::test]
#[ignore = "Requires FBR sandbox credentials"]
async fn test_sandbox_validates_standard_rate_invoice() {
    let client = sandbox_client();
    let invoice = client
        .map_order_checked(&standard_rate_order(), None)
        .await
        .unwrap();

    let response = client.validate_invoice(&invoice, None).await.unwrap();
    assert!(
        response.is_valid(),
        "sandbox rejected invoice: {:?}",
        response.error_messages()
    );
}

#[tokio::test]
#[ignore = "Requires FBR sandbox credentials"]
async fn test_sandbox_two_phase_submission() {
    let client = sandbox_client();
    let invoice = client
        .map_order_checked(&standard_rate_order(), None)
        .await
        .unwrap();

    match client.submit(&invoice, None).await.unwrap() {
        SubmissionOutcome::Posted(response) => {
            assert!(
                response.invoice_number.is_some(),
                "posted invoice has no invoice number"
            );
        }
        SubmissionOutcome::Rejected(response) => {
            panic!("sandbox rejected invoice: {:?}", response.error_messages());
        }
    }
}

#[tokio::test]
#[ignore = "Requires FBR sandbox credentials"]
async fn test_sandbox_sale_type_rate_lookup() {
    let client = sandbox_client();
    let rates = client
        .sale_type_to_rate(chrono::Utc::now().date_naive(), None)
        .await
        .unwrap();
    assert!(!rates.is_empty(), "rate table came back empty");
}
