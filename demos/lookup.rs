//! Query the sandbox registry.
//!
//! Run with: `cargo run --example lookup -- 7171642051`
//!
//! Uses `NIP24_KEY_ID`/`NIP24_KEY` for the production service when set.

use nip24::client::{ClientConfig, Nip24Client};
use nip24::core::Nip24Error;
use nip24::number::Family;

#[tokio::main]
async fn main() -> Result<(), Nip24Error> {
    let nip = std::env::args().nth(1).unwrap_or_else(|| "7171642051".into());
    let client = Nip24Client::new(ClientConfig::from_env()?)?;

    let account = client.account_status().await?;
    println!(
        "Plan: {} ({} requests so far)",
        account.billing_plan_name.as_deref().unwrap_or("—"),
        account.total_count.unwrap_or(0)
    );

    match client.is_active(Family::Nip, &nip).await {
        Ok(true) => println!("{nip}: active"),
        Ok(false) => {
            println!("{nip}: suspended or closed");
            return Ok(());
        }
        Err(e) => {
            println!("{nip}: {}", e.outcome());
            return Ok(());
        }
    }

    let invoice = client.invoice_data(Family::Nip, &nip).await?;
    println!("\n=== Invoice Data ===");
    println!("  {}", invoice.name.as_deref().unwrap_or("—"));
    println!(
        "  {} {}, {} {}",
        invoice.street.as_deref().unwrap_or(""),
        invoice.street_number.as_deref().unwrap_or(""),
        invoice.post_code.as_deref().unwrap_or(""),
        invoice.city.as_deref().unwrap_or("")
    );

    let vat = client.vat_status(Family::Nip, &nip).await?;
    println!("\n=== VAT Status ===");
    println!(
        "  {:?} ({})",
        vat.registration(),
        vat.result.as_deref().unwrap_or("—")
    );

    let vies = client.vies_data(&format!("PL{nip}")).await?;
    println!("\n=== VIES ===");
    println!("  valid={} trader={:?}", vies.valid, vies.trader_name);

    Ok(())
}
