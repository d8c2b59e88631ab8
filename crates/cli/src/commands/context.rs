//! Shared setup for commands: configuration, chain source and parameters.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use lev_alloc_chain::{ChainSource, JsonFileChainSource, SampleChainSource};
use lev_alloc_core::{
    AllocationParameters, AppConfig, ChainSourceKind, ConfigLoader, OptionChain,
};

/// Where to read configuration and the option chain from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Config profile overlay (config/Config.{profile}.toml)
    #[arg(long)]
    pub profile: Option<String>,

    /// Underlying symbol (overrides chain.symbol)
    #[arg(long)]
    pub symbol: Option<String>,

    /// Read the chain from this JSON file instead of the configured source
    #[arg(long)]
    pub chain_file: Option<String>,
}

/// Allocation targets; anything omitted falls back to configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Total equity to deploy
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Target leverage ratio (1.0 = unleveraged)
    #[arg(long)]
    pub leverage: Option<Decimal>,

    /// Expiry to allocate into (YYYY-MM-DD); defaults to the earliest call expiry
    #[arg(long)]
    pub expiry: Option<NaiveDate>,

    /// Minimum per-share delta (inclusive)
    #[arg(long)]
    pub delta_min: Option<Decimal>,

    /// Maximum per-share delta (inclusive)
    #[arg(long)]
    pub delta_max: Option<Decimal>,
}

/// Loads configuration, honouring an optional profile.
pub fn load_config(args: &SourceArgs) -> Result<AppConfig> {
    ConfigLoader::load_from(&args.config, args.profile.as_deref())
        .with_context(|| format!("Failed to load configuration from {}", args.config))
}

/// Builds the chain source selected by flags or configuration.
pub fn chain_source(args: &SourceArgs, config: &AppConfig) -> Result<Box<dyn ChainSource>> {
    if let Some(path) = &args.chain_file {
        return Ok(Box::new(JsonFileChainSource::new(path)));
    }

    match config.chain.source {
        ChainSourceKind::Sample => Ok(Box::new(SampleChainSource::new())),
        ChainSourceKind::JsonFile => {
            let path = config
                .chain
                .path
                .as_deref()
                .ok_or_else(|| anyhow!("chain.source = \"json_file\" requires chain.path"))?;
            Ok(Box::new(JsonFileChainSource::new(path)))
        }
    }
}

/// Fetches the chain for the selected symbol.
pub async fn fetch_chain(args: &SourceArgs, config: &AppConfig) -> Result<OptionChain> {
    let symbol = args.symbol.as_deref().unwrap_or(&config.chain.symbol);
    let source = chain_source(args, config)?;

    tracing::info!(symbol, source = source.name(), "Fetching option chain");

    source
        .fetch_chain(symbol)
        .await
        .with_context(|| format!("Failed to fetch {symbol} chain from {}", source.name()))
}

/// Merges flags over configured defaults into run parameters.
///
/// # Errors
/// Returns an error if no expiry is given and the chain lists no calls, or
/// if the delta bounds are inverted.
pub fn resolve_params(
    args: &ParamArgs,
    config: &AppConfig,
    chain: &OptionChain,
) -> Result<AllocationParameters> {
    let defaults = &config.allocation;

    let selected_expiry = match args.expiry.or(defaults.selected_expiry) {
        Some(expiry) => expiry,
        None => chain
            .expiries()
            .first()
            .copied()
            .ok_or_else(|| anyhow!("{} chain lists no call expiries", chain.quote.symbol))?,
    };

    let params = AllocationParameters {
        total_equity: args.equity.unwrap_or(defaults.total_equity),
        target_leverage: args.leverage.unwrap_or(defaults.target_leverage),
        selected_expiry,
        delta_min: args.delta_min.unwrap_or(defaults.delta_min),
        delta_max: args.delta_max.unwrap_or(defaults.delta_max),
    };

    if params.delta_min > params.delta_max {
        bail!(
            "delta_min {} is above delta_max {}",
            params.delta_min,
            params.delta_max
        );
    }

    Ok(params)
}
