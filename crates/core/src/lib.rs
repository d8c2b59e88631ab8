//! Domain types, rejection taxonomy and configuration shared by the
//! leveraged options allocation workspace.

pub mod allocation;
pub mod config;
pub mod config_loader;
pub mod types;

pub use allocation::{AllocationResult, RejectReason, COST_TOLERANCE, DENOMINATOR_EPSILON};
pub use config::{AllocationDefaults, AppConfig, ChainConfig, ChainSourceKind};
pub use config_loader::ConfigLoader;
pub use types::{
    AllocationParameters, OptionChain, OptionContract, OptionKind, Quote, CONTRACT_MULTIPLIER,
};
