//! Types returned by the optimizer.

use serde::{Deserialize, Serialize};

use lev_alloc_core::AllocationResult;

/// Ranked allocations plus the one to surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Valid whole-contract allocations, best first.
    pub results: Vec<AllocationResult>,
    pub optimal: Option<AllocationResult>,
}

impl OptimizationOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
