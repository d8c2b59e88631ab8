//! Chain source backed by a JSON document on disk.
//!
//! The document is a serialized [`OptionChain`]:
//!
//! ```json
//! {
//!   "quote": { "symbol": "AAPL", "price": "175.5", "as_of": "2025-10-01T14:30:00Z" },
//!   "contracts": [
//!     { "id": "2025-11-15-C-170", "strike": "170", "expiry": "2025-11-15",
//!       "premium_per_share": "8.5", "delta_per_share": "0.65", "kind": "call" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use lev_alloc_core::OptionChain;

use crate::source::{check_chain, ChainError, ChainSource};

/// Reads the chain file on every fetch, so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct JsonFileChainSource {
    path: PathBuf,
}

impl JsonFileChainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `chain` in the format this source reads.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, chain: &OptionChain) -> Result<(), ChainError> {
        let json = serde_json::to_vec_pretty(chain)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl ChainSource for JsonFileChainSource {
    async fn fetch_chain(&self, symbol: &str) -> Result<OptionChain, ChainError> {
        debug!(symbol, path = %self.path.display(), "Reading chain file");

        let bytes = tokio::fs::read(&self.path).await?;
        let chain: OptionChain = serde_json::from_slice(&bytes)?;
        let chain = check_chain(symbol, chain)?;

        info!(
            symbol = chain.quote.symbol,
            contracts = chain.contracts.len(),
            price = %chain.quote.price,
            "Loaded chain"
        );
        Ok(chain)
    }

    fn name(&self) -> &str {
        "json_file"
    }
}
