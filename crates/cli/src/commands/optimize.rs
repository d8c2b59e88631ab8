//! Optimize command: rank every feasible allocation for one expiry.

use anyhow::Result;
use clap::Args;

use lev_alloc_solver::optimize;

use super::context::{fetch_chain, load_config, resolve_params, ParamArgs, SourceArgs};
use crate::report::AllocationFormatter;

/// Arguments for the optimize command.
#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of ranked rows to print
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Print the full outcome as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Runs the optimize command.
///
/// # Errors
/// Returns an error if configuration or the chain cannot be loaded.
pub async fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    let chain = fetch_chain(&args.source, &config).await?;
    let params = resolve_params(&args.params, &config, &chain)?;

    let outcome = optimize(&chain.contracts, &chain.quote, &params);

    match &outcome.optimal {
        Some(best) => tracing::info!(
            candidates = outcome.results.len(),
            contract = best.contract.id,
            contracts = %best.contracts_count,
            leverage = %best.achieved_leverage.round_dp(4),
            "Optimal allocation found"
        ),
        None => tracing::warn!(
            expiry = %params.selected_expiry,
            leverage = %params.target_leverage,
            "No feasible allocation"
        ),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!(
            "{}",
            AllocationFormatter::format_outcome(&chain.quote, &params, &outcome, args.top)
        );
    }

    Ok(())
}
