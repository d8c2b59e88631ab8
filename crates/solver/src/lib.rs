//! Leveraged options allocation solver.
//!
//! Given a call option chain, an underlying quote and an equity budget, finds
//! the whole number of contracts plus fractional shares that:
//! - spend the entire budget (no residual cash)
//! - land as close as possible to a target leverage ratio
//!
//! and ranks the feasible allocations, fewest contracts first.
//!
//! Everything here is pure and synchronous. Rejections are data
//! ([`lev_alloc_core::RejectReason`]), never errors.

pub mod allocator;
pub mod optimizer;
pub mod types;

pub use allocator::{solve_at_contracts, solve_exact};
pub use optimizer::{compute_all, optimize, pick_optimal};
pub use types::OptimizationOutcome;
