//! Chain source abstraction: where contracts and the underlying quote come from.

use async_trait::async_trait;
use thiserror::Error;

use lev_alloc_core::OptionChain;

/// Errors from chain sources.
#[derive(Error, Debug)]
pub enum ChainError {
    /// IO error reading the chain document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chain document is not valid JSON for an [`OptionChain`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source holds a chain for a different underlying.
    #[error("requested {requested} but chain is for {found}")]
    SymbolMismatch { requested: String, found: String },

    /// The source has no contracts to offer.
    #[error("chain for {0} has no contracts")]
    Empty(String),
}

/// Supplies an option chain for one underlying per refresh.
///
/// Retry, caching and provider-specific normalization belong to the
/// implementation; callers receive an already-normalized [`OptionChain`].
#[async_trait]
pub trait ChainSource: Send + Sync {
    async fn fetch_chain(&self, symbol: &str) -> Result<OptionChain, ChainError>;

    fn name(&self) -> &str;
}

/// Rejects chains that do not belong to `symbol` or carry no contracts.
pub(crate) fn check_chain(symbol: &str, chain: OptionChain) -> Result<OptionChain, ChainError> {
    if !chain.quote.symbol.eq_ignore_ascii_case(symbol) {
        return Err(ChainError::SymbolMismatch {
            requested: symbol.to_uppercase(),
            found: chain.quote.symbol,
        });
    }
    if chain.contracts.is_empty() {
        return Err(ChainError::Empty(chain.quote.symbol));
    }
    Ok(chain)
}
