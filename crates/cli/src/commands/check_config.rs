//! Configuration and connectivity check.

#![allow(clippy::print_stdout)]

use hisaab_fbr::{FbrClient, FbrConfig};

/// Load the FBR configuration, report validity, and probe the sandbox.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = FbrConfig::from_env()?;
    println!("base URL: {}", config.base_url);
    println!(
        "seller:   {} ({})",
        if config.seller.business_name.is_empty() {
            "<unset>"
        } else {
            &config.seller.business_name
        },
        if config.seller.ntn_cnic.is_empty() {
            "<no NTN>"
        } else {
            &config.seller.ntn_cnic
        }
    );

    let client = FbrClient::new(config);
    let status = client.test_connection().await;
    println!("config valid: {}", status.config_valid);
    println!("reachable:    {}", status.reachable);

    if !status.config_valid {
        return Err("configuration is invalid".into());
    }
    Ok(())
}
