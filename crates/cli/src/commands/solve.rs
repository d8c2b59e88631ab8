//! Solve command: exact and whole-contract solves for a single contract.

use anyhow::{anyhow, Result};
use clap::Args;
use rust_decimal::Decimal;

use lev_alloc_solver::optimizer::candidate_counts;
use lev_alloc_solver::{solve_at_contracts, solve_exact};

use super::context::{fetch_chain, load_config, resolve_params, ParamArgs, SourceArgs};
use crate::report::AllocationFormatter;

/// Arguments for the solve command.
#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Contract id (e.g., "2025-11-15-C-170")
    #[arg(long)]
    pub contract: String,

    /// Solve at this many contracts instead of bracketing the exact solution
    #[arg(long)]
    pub contracts: Option<u64>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub params: ParamArgs,
}

/// Runs the solve command.
///
/// # Errors
/// Returns an error if configuration or the chain cannot be loaded, or the
/// contract id is not in the chain.
pub async fn run_solve(args: SolveArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    let chain = fetch_chain(&args.source, &config).await?;
    let params = resolve_params(&args.params, &config, &chain)?;

    let contract = chain.contract(&args.contract).ok_or_else(|| {
        anyhow!(
            "Contract {} not found in {} chain",
            args.contract,
            chain.quote.symbol
        )
    })?;

    let price = chain.quote.price;
    let (equity, leverage) = (params.total_equity, params.target_leverage);

    println!("\n=== Exact solve ===\n");
    let exact = solve_exact(contract, price, equity, leverage);
    print!("{}", AllocationFormatter::format_detail(&exact));

    let counts = match args.contracts {
        Some(count) => vec![Decimal::from(count)],
        None if exact.valid => candidate_counts(exact.contracts_count),
        None => vec![],
    };

    for count in counts {
        println!("\n=== {count} contract(s) ===\n");
        let result = solve_at_contracts(contract, price, equity, leverage, count);
        print!("{}", AllocationFormatter::format_detail(&result));
    }

    Ok(())
}
