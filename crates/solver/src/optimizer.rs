//! Chain-wide optimizer: filter, bracket the exact solve with whole
//! contract counts, rank.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::debug;

use lev_alloc_core::{AllocationParameters, AllocationResult, OptionContract, OptionKind, Quote};

use crate::allocator::{solve_at_contracts, solve_exact};
use crate::types::OptimizationOutcome;

/// Call, selected expiry, per-share delta within the inclusive bounds.
pub fn is_eligible(contract: &OptionContract, params: &AllocationParameters) -> bool {
    contract.kind == OptionKind::Call
        && contract.expiry == params.selected_expiry
        && contract.delta_per_share >= params.delta_min
        && contract.delta_per_share <= params.delta_max
}

/// Whole contract counts bracketing an exact solution: floor and ceiling,
/// zero dropped, duplicates collapsed.
///
/// Counts stay in [`Decimal`] so large equities never lose a candidate to
/// integer narrowing.
pub fn candidate_counts(exact_contracts: Decimal) -> Vec<Decimal> {
    let mut counts: Vec<Decimal> = [exact_contracts.floor(), exact_contracts.ceil()]
        .into_iter()
        .filter(|c| *c > Decimal::ZERO)
        .collect();
    counts.dedup();
    counts
}

/// Ranking order: fewer contracts first, then closest to target leverage.
pub fn rank_order(a: &AllocationResult, b: &AllocationResult) -> Ordering {
    a.contracts_count
        .cmp(&b.contracts_count)
        .then_with(|| a.leverage_gap.cmp(&b.leverage_gap))
}

/// Stable sort by [`rank_order`].
pub fn rank_results(results: &mut [AllocationResult]) {
    results.sort_by(rank_order);
}

/// Computes every feasible whole-contract allocation for the eligible
/// contracts, ranked best first.
///
/// Contracts whose exact solve is rejected contribute nothing; an empty
/// list means no feasible allocation exists for these parameters.
pub fn compute_all(
    contracts: &[OptionContract],
    quote: &Quote,
    params: &AllocationParameters,
) -> Vec<AllocationResult> {
    let mut eligible = 0usize;
    let mut results = Vec::new();

    for contract in contracts.iter().filter(|c| is_eligible(c, params)) {
        eligible += 1;

        let exact = solve_exact(
            contract,
            quote.price,
            params.total_equity,
            params.target_leverage,
        );
        if !exact.valid {
            continue;
        }

        for count in candidate_counts(exact.contracts_count) {
            let candidate = solve_at_contracts(
                contract,
                quote.price,
                params.total_equity,
                params.target_leverage,
                count,
            );
            if candidate.is_rankable() {
                results.push(candidate);
            }
        }
    }

    rank_results(&mut results);

    debug!(
        symbol = quote.symbol,
        universe = contracts.len(),
        eligible,
        candidates = results.len(),
        expiry = %params.selected_expiry,
        target_leverage = %params.target_leverage,
        "Computed allocations"
    );

    results
}

/// Best valid allocation with at least one contract.
///
/// Does not rely on the input being ranked: invalid entries are skipped and
/// the minimum under [`rank_order`] is returned (first one wins on ties).
pub fn pick_optimal(results: &[AllocationResult]) -> Option<AllocationResult> {
    results
        .iter()
        .filter(|r| r.is_rankable())
        .min_by(|a, b| rank_order(a, b))
        .cloned()
}

/// [`compute_all`] and [`pick_optimal`] in one call.
pub fn optimize(
    contracts: &[OptionContract],
    quote: &Quote,
    params: &AllocationParameters,
) -> OptimizationOutcome {
    let results = compute_all(contracts, quote, params);
    let optimal = pick_optimal(&results);
    OptimizationOutcome { results, optimal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use lev_alloc_core::RejectReason;
    use rust_decimal_macros::dec;

    fn nov() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
    }

    fn quote() -> Quote {
        Quote {
            symbol: "AAPL".to_string(),
            price: dec!(175.5),
            as_of: Utc::now(),
        }
    }

    fn params(leverage: Decimal) -> AllocationParameters {
        AllocationParameters {
            total_equity: dec!(10000),
            target_leverage: leverage,
            selected_expiry: nov(),
            delta_min: dec!(0.3),
            delta_max: dec!(0.9),
        }
    }

    fn ranked(id: &str, contracts: Decimal, gap: Decimal) -> AllocationResult {
        let mut contract = OptionContract::call(dec!(170), nov(), dec!(8.5), dec!(0.65));
        contract.id = id.to_string();
        AllocationResult {
            contract,
            contracts_count: contracts,
            shares_count: dec!(10),
            total_cost: dec!(10000),
            achieved_leverage: dec!(1.5) + gap,
            leverage_gap: gap,
            delta_exposure: dec!(10),
            valid: true,
            reason: None,
        }
    }

    #[test]
    fn eligibility_filters_kind_expiry_and_delta_bounds() {
        let p = params(dec!(1.75));
        let base = OptionContract::call(dec!(170), nov(), dec!(8.5), dec!(0.65));
        assert!(is_eligible(&base, &p));

        let mut put = base.clone();
        put.kind = OptionKind::Put;
        assert!(!is_eligible(&put, &p));

        let mut dec_expiry = base.clone();
        dec_expiry.expiry = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
        assert!(!is_eligible(&dec_expiry, &p));

        let mut at_min = base.clone();
        at_min.delta_per_share = dec!(0.3);
        assert!(is_eligible(&at_min, &p));

        let mut at_max = base.clone();
        at_max.delta_per_share = dec!(0.9);
        assert!(is_eligible(&at_max, &p));

        let mut above = base;
        above.delta_per_share = dec!(0.91);
        assert!(!is_eligible(&above, &p));
    }

    #[test]
    fn candidates_bracket_exact_solution() {
        assert_eq!(candidate_counts(dec!(2.4)), vec![dec!(2), dec!(3)]);
        assert_eq!(candidate_counts(dec!(0.7104)), vec![dec!(1)]);
        assert_eq!(candidate_counts(dec!(3)), vec![dec!(3)]);
        assert!(candidate_counts(Decimal::ZERO).is_empty());
    }

    #[test]
    fn candidates_beyond_u32_range_are_kept() {
        assert_eq!(
            candidate_counts(dec!(10000000000.5)),
            vec![dec!(10000000000), dec!(10000000001)]
        );
    }

    #[test]
    fn large_equity_allocation_survives_ranking() {
        // O = 10, D = 11, S·D − O = 100, C* = 1e12 / 100 = 1e10
        let penny_call = OptionContract::call(dec!(10), nov(), dec!(0.1), dec!(0.11));
        let quote = Quote {
            symbol: "PENNY".to_string(),
            price: dec!(10),
            as_of: Utc::now(),
        };
        let params = AllocationParameters {
            total_equity: dec!(1000000000000),
            target_leverage: dec!(2),
            selected_expiry: nov(),
            delta_min: dec!(0.1),
            delta_max: dec!(0.9),
        };

        let outcome = optimize(&[penny_call], &quote, &params);

        assert_eq!(outcome.results.len(), 1);
        let best = outcome.optimal.expect("floor candidate is feasible");
        assert_eq!(best.contracts_count, dec!(10000000000));
        assert_eq!(best.shares_count, dec!(90000000000));
        assert!((best.total_cost - params.total_equity).abs() <= dec!(0.01));
        assert!(best.leverage_gap < dec!(0.0000001));
    }

    #[test]
    fn single_contract_yields_ceiling_candidate_only() {
        let contract = OptionContract::call(dec!(170), nov(), dec!(8.5), dec!(0.65));
        let results = compute_all(&[contract], &quote(), &params(dec!(1.75)));

        assert_eq!(results.len(), 1);
        let only = &results[0];
        assert_eq!(only.contracts_count, dec!(1));
        assert!((only.shares_count - dec!(52.136)).abs() < dec!(0.001));
        assert!((only.total_cost - dec!(10000)).abs() <= dec!(0.01));
    }

    #[test]
    fn unit_leverage_produces_no_candidates() {
        let contract = OptionContract::call(dec!(170), nov(), dec!(8.5), dec!(0.65));
        let results = compute_all(&[contract], &quote(), &params(dec!(1)));
        assert!(results.is_empty());
    }

    #[test]
    fn contracts_with_rejected_exact_solve_are_skipped() {
        // S·D == O
        let degenerate = OptionContract::call(dec!(100), nov(), dec!(114.075), dec!(0.65));
        let results = compute_all(&[degenerate.clone()], &quote(), &params(dec!(1.75)));
        assert!(results.is_empty());

        let exact = solve_exact(&degenerate, dec!(175.5), dec!(10000), dec!(1.75));
        assert_eq!(exact.reason, Some(RejectReason::DegenerateDenominator));
    }

    #[test]
    fn empty_universe_has_no_optimum() {
        let results = compute_all(&[], &quote(), &params(dec!(1.75)));
        assert!(results.is_empty());
        assert!(pick_optimal(&results).is_none());
        assert!(pick_optimal(&[]).is_none());
    }

    #[test]
    fn equal_counts_rank_by_leverage_gap() {
        let mut results = vec![
            ranked("wide", dec!(2), dec!(0.15)),
            ranked("tight", dec!(2), dec!(0.03)),
        ];
        rank_results(&mut results);
        assert_eq!(results[0].contract.id, "tight");
        assert_eq!(results[1].contract.id, "wide");
    }

    #[test]
    fn fewer_contracts_beat_closer_leverage() {
        let mut results = vec![
            ranked("three", dec!(3), dec!(0.001)),
            ranked("two", dec!(2), dec!(0.5)),
        ];
        rank_results(&mut results);
        assert_eq!(results[0].contract.id, "two");
    }

    #[test]
    fn ranking_is_stable_for_equal_keys() {
        let mut results = vec![
            ranked("first", dec!(1), dec!(0.1)),
            ranked("second", dec!(1), dec!(0.1)),
        ];
        rank_results(&mut results);
        assert_eq!(results[0].contract.id, "first");
        assert_eq!(pick_optimal(&results).unwrap().contract.id, "first");
    }

    #[test]
    fn pick_optimal_handles_unsorted_input_with_invalid_entries() {
        let mut rejected = ranked("rejected", dec!(0), dec!(0));
        rejected.valid = false;
        rejected.reason = Some(RejectReason::ExceedsBudget);

        let zero = ranked("zero", dec!(0), dec!(0));

        let results = vec![
            ranked("four", dec!(4), dec!(0.01)),
            rejected,
            zero,
            ranked("two-wide", dec!(2), dec!(0.2)),
            ranked("two-tight", dec!(2), dec!(0.05)),
        ];

        let best = pick_optimal(&results).unwrap();
        assert_eq!(best.contract.id, "two-tight");
    }

    #[test]
    fn pick_optimal_none_when_nothing_rankable() {
        let mut rejected = ranked("rejected", dec!(2), dec!(0));
        rejected.valid = false;
        rejected.reason = Some(RejectReason::ContractCostExceedsEquity);
        assert!(pick_optimal(&[rejected, ranked("zero", dec!(0), dec!(0))]).is_none());
    }

    #[test]
    fn optimize_returns_ranked_results_and_their_head() {
        let contracts = vec![
            OptionContract::call(dec!(170), nov(), dec!(8.5), dec!(0.65)),
            OptionContract::call(dec!(180), nov(), dec!(4.2), dec!(0.42)),
        ];
        let outcome = optimize(&contracts, &quote(), &params(dec!(2.5)));

        assert!(!outcome.results.is_empty());
        assert_eq!(outcome.optimal.as_ref(), outcome.results.first());
    }
}
