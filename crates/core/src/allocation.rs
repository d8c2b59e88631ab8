//! Allocation results and the rejection taxonomy.
//!
//! A solve never fails with an error: it returns an [`AllocationResult`] that
//! is either valid or carries the [`RejectReason`] explaining why not.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::OptionContract;

/// Absolute tolerance (currency units) for the budget check.
pub const COST_TOLERANCE: Decimal = dec!(0.01);

/// Smallest `|S·D − O|` the exact solve accepts before calling the
/// denominator degenerate.
pub const DENOMINATOR_EPSILON: Decimal = dec!(0.01);

/// Why an allocation could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Price, premium, delta, equity or leverage is non-positive.
    #[error("invalid inputs")]
    InvalidInputs,
    /// `S·D − O` is within tolerance of zero.
    #[error("degenerate denominator")]
    DegenerateDenominator,
    /// The exact solution needs a negative number of contracts.
    #[error("requires short position")]
    ShortPositionRequired,
    /// The solution needs a negative number of shares.
    #[error("requires negative shares")]
    NegativeSharesRequired,
    /// A derived quantity could not be represented.
    #[error("non-finite result")]
    NonFiniteResult,
    /// Total cost is above equity beyond tolerance.
    #[error("exceeds budget")]
    ExceedsBudget,
    /// Contract premium alone is above equity.
    #[error("contract cost exceeds equity")]
    ContractCostExceedsEquity,
}

impl RejectReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInputs => "invalid-inputs",
            Self::DegenerateDenominator => "degenerate-denominator",
            Self::ShortPositionRequired => "short-position-required",
            Self::NegativeSharesRequired => "negative-shares-required",
            Self::NonFiniteResult => "non-finite-result",
            Self::ExceedsBudget => "exceeds-budget",
            Self::ContractCostExceedsEquity => "contract-cost-exceeds-equity",
        }
    }
}

/// Outcome of solving one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Source contract
    pub contract: OptionContract,
    /// Contracts to buy (C). Integral when produced for a fixed count.
    pub contracts_count: Decimal,
    /// Shares to buy (N), possibly fractional
    pub shares_count: Decimal,
    /// `S·N + O·C`
    pub total_cost: Decimal,
    /// `(N + D·C)·S / T`
    pub achieved_leverage: Decimal,
    /// Absolute distance from the target leverage
    pub leverage_gap: Decimal,
    /// Share-equivalent exposure, `N + D·C`
    pub delta_exposure: Decimal,
    pub valid: bool,
    /// Set iff `valid` is false
    pub reason: Option<RejectReason>,
}

impl AllocationResult {
    /// A rejected result. All numeric fields are zero.
    pub fn rejected(contract: &OptionContract, reason: RejectReason) -> Self {
        Self {
            contract: contract.clone(),
            contracts_count: Decimal::ZERO,
            shares_count: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            achieved_leverage: Decimal::ZERO,
            leverage_gap: Decimal::ZERO,
            delta_exposure: Decimal::ZERO,
            valid: false,
            reason: Some(reason),
        }
    }

    /// Valid with at least one contract; the only results eligible for ranking.
    pub fn is_rankable(&self) -> bool {
        self.valid && self.contracts_count > Decimal::ZERO
    }

    /// Dollar amount spent on option premium.
    pub fn contract_cost(&self) -> Decimal {
        self.contract.premium_per_contract() * self.contracts_count
    }
}
