//! Banks command - list supported statement issuers.

use console::style;

use cardledger_core::models::profile::profiles;

pub async fn run() -> anyhow::Result<()> {
    println!("{}", style("Supported banks:").bold());
    println!();

    for profile in profiles() {
        let key = serde_json::to_value(profile.id)?;
        println!(
            "  {} ({})",
            style(profile.id.name()).cyan(),
            key.as_str().unwrap_or_default()
        );
        println!("    Date format:     {}", profile.date_format);
        println!("    Sign convention: {}", profile.amount_sign_convention);
        if profile.signatures.is_empty() {
            println!("    Signatures:      (fallback when no signature matches)");
        } else {
            println!("    Signatures:      {}", profile.signatures.join(", "));
        }
        println!();
    }

    Ok(())
}
