//! Expiries command: list the call expiries a chain offers.

use anyhow::Result;
use clap::Args;

use super::context::{fetch_chain, load_config, SourceArgs};

/// Arguments for the expiries command.
#[derive(Args, Debug, Clone)]
pub struct ExpiriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Runs the expiries command.
///
/// # Errors
/// Returns an error if configuration or the chain cannot be loaded.
pub async fn run_expiries(args: ExpiriesArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    let chain = fetch_chain(&args.source, &config).await?;

    println!("\n=== {} call expiries ===\n", chain.quote.symbol);
    for expiry in chain.expiries() {
        let calls = chain
            .contracts
            .iter()
            .filter(|c| c.expiry == expiry && c.kind == lev_alloc_core::OptionKind::Call)
            .count();
        println!("  {expiry}  ({calls} calls)");
    }

    Ok(())
}
