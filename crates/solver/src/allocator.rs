//! Single-contract allocation solver.
//!
//! Splits a fixed equity budget `T` between shares (price `S`) and call
//! contracts (per-contract premium `O`, per-contract delta `D`) so that the
//! whole budget is spent and the delta-weighted exposure hits leverage `L`:
//!
//! ```text
//! spend:     S·N + O·C = T
//! leverage:  (N + D·C)·S / T = L
//!
//! C = T·(L − 1) / (S·D − O)
//! N = L·T/S − D·C
//! ```
//!
//! Both entry points are pure. Failures come back as rejected
//! [`AllocationResult`]s, never as errors.

use rust_decimal::Decimal;

use lev_alloc_core::{
    AllocationResult, OptionContract, RejectReason, CONTRACT_MULTIPLIER, COST_TOLERANCE,
    DENOMINATOR_EPSILON,
};

/// Solves for the real-valued contract count that hits `target_leverage` exactly.
///
/// Checks run in a fixed order: input sanity, degenerate denominator,
/// short contracts, negative shares, unrepresentable values, budget.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lev_alloc_core::OptionContract;
/// use lev_alloc_solver::allocator::solve_exact;
/// use rust_decimal_macros::dec;
///
/// let expiry = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
/// let contract = OptionContract::call(dec!(170), expiry, dec!(8.5), dec!(0.65));
/// let result = solve_exact(&contract, dec!(175.5), dec!(10000), dec!(1.75));
///
/// assert!(result.valid);
/// assert!(result.contracts_count > dec!(0) && result.contracts_count < dec!(1));
/// ```
#[must_use]
pub fn solve_exact(
    contract: &OptionContract,
    stock_price: Decimal,
    total_equity: Decimal,
    target_leverage: Decimal,
) -> AllocationResult {
    let outcome = SolveInputs::new(contract, stock_price, total_equity, target_leverage)
        .and_then(|inputs| inputs.exact());
    finish(contract, outcome)
}

/// Allocates exactly `contracts` contracts and puts every remaining dollar
/// into (possibly fractional) shares.
///
/// `contracts` must be a non-negative whole number; anything else is
/// rejected as [`RejectReason::InvalidInputs`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lev_alloc_core::OptionContract;
/// use lev_alloc_solver::allocator::solve_at_contracts;
/// use rust_decimal_macros::dec;
///
/// let expiry = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
/// let contract = OptionContract::call(dec!(170), expiry, dec!(8.5), dec!(0.65));
/// let result = solve_at_contracts(&contract, dec!(175.5), dec!(10000), dec!(1.75), dec!(3));
///
/// assert!(result.valid);
/// assert_eq!(result.contracts_count, dec!(3));
/// ```
#[must_use]
pub fn solve_at_contracts(
    contract: &OptionContract,
    stock_price: Decimal,
    total_equity: Decimal,
    target_leverage: Decimal,
    contracts: Decimal,
) -> AllocationResult {
    let outcome = SolveInputs::new(contract, stock_price, total_equity, target_leverage)
        .and_then(|inputs| inputs.at_contracts(contracts));
    finish(contract, outcome)
}

fn finish(
    contract: &OptionContract,
    outcome: Result<AllocationResult, RejectReason>,
) -> AllocationResult {
    outcome.unwrap_or_else(|reason| {
        tracing::trace!(
            contract = contract.id,
            reason = reason.code(),
            "Allocation rejected"
        );
        AllocationResult::rejected(contract, reason)
    })
}

/// Validated solve inputs with per-contract premium and delta resolved.
struct SolveInputs<'a> {
    contract: &'a OptionContract,
    /// S
    price: Decimal,
    /// O
    premium: Decimal,
    /// D
    delta: Decimal,
    /// T
    equity: Decimal,
    /// L
    leverage: Decimal,
}

impl<'a> SolveInputs<'a> {
    fn new(
        contract: &'a OptionContract,
        price: Decimal,
        equity: Decimal,
        leverage: Decimal,
    ) -> Result<Self, RejectReason> {
        let all_positive = [
            price,
            contract.premium_per_share,
            contract.delta_per_share,
            equity,
            leverage,
        ]
        .iter()
        .all(|v| *v > Decimal::ZERO);
        if !all_positive {
            return Err(RejectReason::InvalidInputs);
        }

        let premium = checked(contract.premium_per_share.checked_mul(CONTRACT_MULTIPLIER))?;
        let delta = checked(contract.delta_per_share.checked_mul(CONTRACT_MULTIPLIER))?;

        Ok(Self {
            contract,
            price,
            premium,
            delta,
            equity,
            leverage,
        })
    }

    fn exact(&self) -> Result<AllocationResult, RejectReason> {
        let denominator = checked(
            self.price
                .checked_mul(self.delta)
                .and_then(|sd| sd.checked_sub(self.premium)),
        )?;
        if denominator.abs() < DENOMINATOR_EPSILON {
            return Err(RejectReason::DegenerateDenominator);
        }

        // C = T·(L − 1) / (S·D − O)
        let contracts = checked(
            self.leverage
                .checked_sub(Decimal::ONE)
                .and_then(|excess| self.equity.checked_mul(excess))
                .and_then(|num| num.checked_div(denominator)),
        )?;
        if contracts < Decimal::ZERO {
            return Err(RejectReason::ShortPositionRequired);
        }

        // N = L·T/S − D·C
        let shares = checked(
            self.leverage
                .checked_mul(self.equity)
                .and_then(|lt| lt.checked_div(self.price))
                .zip(self.delta.checked_mul(contracts))
                .and_then(|(target, covered)| target.checked_sub(covered)),
        )?;
        if shares < Decimal::ZERO {
            return Err(RejectReason::NegativeSharesRequired);
        }

        self.assemble(contracts, shares)
    }

    fn at_contracts(&self, contracts: Decimal) -> Result<AllocationResult, RejectReason> {
        if contracts < Decimal::ZERO || !contracts.fract().is_zero() {
            return Err(RejectReason::InvalidInputs);
        }

        let contract_cost = checked(self.premium.checked_mul(contracts))?;
        if contract_cost > self.equity {
            return Err(RejectReason::ContractCostExceedsEquity);
        }

        let shares = checked((self.equity - contract_cost).checked_div(self.price))?;
        if shares < Decimal::ZERO {
            return Err(RejectReason::NegativeSharesRequired);
        }

        self.assemble(contracts, shares)
    }

    /// Derives cost, leverage and exposure for a (C, N) pair and applies the
    /// budget check.
    fn assemble(
        &self,
        contracts: Decimal,
        shares: Decimal,
    ) -> Result<AllocationResult, RejectReason> {
        let option_exposure = checked(self.delta.checked_mul(contracts))?;
        let delta_exposure = checked(shares.checked_add(option_exposure))?;

        let total_cost = checked(
            self.price
                .checked_mul(shares)
                .zip(self.premium.checked_mul(contracts))
                .and_then(|(stock, options)| stock.checked_add(options)),
        )?;

        let achieved_leverage = checked(
            delta_exposure
                .checked_mul(self.price)
                .and_then(|notional| notional.checked_div(self.equity)),
        )?;
        let leverage_gap = checked(achieved_leverage.checked_sub(self.leverage))?.abs();

        // Exact and fixed-count solves spend T by construction; this only
        // catches rounding drift.
        let budget = self.equity.checked_add(COST_TOLERANCE).unwrap_or(Decimal::MAX);
        if total_cost > budget {
            return Err(RejectReason::ExceedsBudget);
        }

        Ok(AllocationResult {
            contract: self.contract.clone(),
            contracts_count: contracts,
            shares_count: shares,
            total_cost,
            achieved_leverage,
            leverage_gap,
            delta_exposure,
            valid: true,
            reason: None,
        })
    }
}

/// Overflowed decimal arithmetic is the analogue of a NaN.
fn checked(value: Option<Decimal>) -> Result<Decimal, RejectReason> {
    value.ok_or(RejectReason::NonFiniteResult)
}
