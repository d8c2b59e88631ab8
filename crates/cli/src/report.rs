#![allow(clippy::format_push_string)]

use rust_decimal::Decimal;

use lev_alloc_core::{AllocationParameters, AllocationResult, Quote};
use lev_alloc_solver::OptimizationOutcome;

const RULE: &str = "───────────────────────────────────────────────────────────────────────────\n";

pub struct AllocationFormatter;

impl AllocationFormatter {
    /// Ranked table plus the optimal allocation, as printed by `optimize`.
    #[must_use]
    pub fn format_outcome(
        quote: &Quote,
        params: &AllocationParameters,
        outcome: &OptimizationOutcome,
        top: usize,
    ) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════════════════\n");
        output.push_str("                      LEVERAGED OPTIONS ALLOCATION                         \n");
        output.push_str("═══════════════════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str(&format!(
            "Underlying:            {} @ ${:.2} (as of {})\n",
            quote.symbol,
            quote.price,
            quote.as_of.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Equity:                ${:.2}\n", params.total_equity));
        output.push_str(&format!("Target Leverage:       {:.2}x\n", params.target_leverage));
        output.push_str(&format!("Expiry:                {}\n", params.selected_expiry));
        output.push_str(&format!(
            "Delta Range:           {:.2} – {:.2}\n",
            params.delta_min, params.delta_max
        ));
        output.push('\n');

        if outcome.is_empty() {
            output.push_str("No feasible allocation for these parameters.\n");
            return output;
        }

        output.push_str(&format!(
            "Ranked Allocations ({} of {})\n",
            top.min(outcome.results.len()),
            outcome.results.len()
        ));
        output.push_str(RULE);
        output.push_str(&format!(
            "{:>3}  {:<18} {:>6} {:>6} {:>10} {:>11} {:>9} {:>8} {:>9}\n",
            "#", "Contract", "Delta", "Qty", "Shares", "Premium $", "Leverage", "Gap", "Exposure"
        ));
        output.push_str(RULE);
        for (rank, result) in outcome.results.iter().take(top).enumerate() {
            output.push_str(&Self::format_row(rank + 1, result));
        }
        output.push('\n');

        if let Some(best) = &outcome.optimal {
            output.push_str("Optimal Allocation\n");
            output.push_str(RULE);
            output.push_str(&Self::format_detail(best));
        }

        output
    }

    /// One table row.
    #[must_use]
    pub fn format_row(rank: usize, result: &AllocationResult) -> String {
        format!(
            "{:>3}  {:<18} {:>6.2} {:>6} {:>10.4} {:>11.2} {:>8.3}x {:>8.4} {:>9.2}\n",
            rank,
            result.contract.display_name(),
            result.contract.delta_per_share,
            result.contracts_count.normalize(),
            result.shares_count,
            result.contract_cost(),
            result.achieved_leverage,
            result.leverage_gap,
            result.delta_exposure,
        )
    }

    /// Multi-line breakdown of one allocation, valid or not.
    #[must_use]
    pub fn format_detail(result: &AllocationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("Contract:              {}\n", result.contract.display_name()));
        if let Some(reason) = result.reason {
            output.push_str(&format!("Status:                rejected ({})\n", reason.code()));
            return output;
        }

        let share_cost = result.total_cost - result.contract_cost();
        output.push_str(&format!(
            "Contracts:             {} (${:.2} premium)\n",
            result.contracts_count.round_dp(6).normalize(),
            result.contract_cost()
        ));
        output.push_str(&format!(
            "Shares:                {:.4} (${:.2})\n",
            result.shares_count, share_cost
        ));
        output.push_str(&format!("Total Cost:            ${:.2}\n", result.total_cost));
        output.push_str(&format!(
            "Achieved Leverage:     {:.4}x (gap {:.4})\n",
            result.achieved_leverage, result.leverage_gap
        ));
        output.push_str(&format!(
            "Delta Exposure:        {:.2} share equivalents\n",
            result.delta_exposure
        ));
        output.push_str(&format!(
            "Shares Fraction:       {}\n",
            if result.shares_count.fract() == Decimal::ZERO {
                "whole"
            } else {
                "fractional"
            }
        ));

        output
    }
}
