//! Option chain sources.
//!
//! The allocation core never fetches data itself; it is handed an
//! [`OptionChain`](lev_alloc_core::OptionChain) by one of these sources.
//! Real broker/market-data integrations would implement [`ChainSource`] too.

pub mod json_file;
pub mod sample;
pub mod source;

pub use json_file::JsonFileChainSource;
pub use sample::{SampleChainSource, SAMPLE_SYMBOL};
pub use source::{ChainError, ChainSource};
