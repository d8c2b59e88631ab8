use clap::{Parser, Subcommand};

mod commands;
mod report;

use commands::{ExpiriesArgs, OptimizeArgs, SolveArgs};

#[derive(Parser)]
#[command(name = "lev-alloc")]
#[command(
    about = "Leveraged options allocation: contracts + fractional shares at a target leverage",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank feasible allocations for an expiry and show the optimal one
    Optimize(OptimizeArgs),
    /// List call expiries available in the chain
    Expiries(ExpiriesArgs),
    /// Exact and whole-contract solves for a single contract
    Solve(SolveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Optimize(args) => commands::run_optimize(args).await?,
        Commands::Expiries(args) => commands::run_expiries(args).await?,
        Commands::Solve(args) => commands::run_solve(args).await?,
    }

    Ok(())
}
