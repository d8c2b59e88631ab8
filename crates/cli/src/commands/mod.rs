//! CLI commands for the leveraged options allocator.

pub mod context;
pub mod expiries;
pub mod optimize;
pub mod solve;

pub use expiries::{run_expiries, ExpiriesArgs};
pub use optimize::{run_optimize, OptimizeArgs};
pub use solve::{run_solve, SolveArgs};
