//! Market-side domain types: contracts, quotes, chains and run parameters.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shares controlled by one standard equity option contract.
pub const CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Option kind (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

/// A single listed option contract as handed over by a chain source.
///
/// Premium and delta are quoted per underlying share; use
/// [`premium_per_contract`](Self::premium_per_contract) and
/// [`delta_per_contract`](Self::delta_per_contract) for per-contract values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub id: String,
    pub strike: Decimal,
    pub expiry: NaiveDate,
    pub premium_per_share: Decimal,
    pub delta_per_share: Decimal,
    pub kind: OptionKind,
}

impl OptionContract {
    /// Create a call contract. The id is derived from strike and expiry.
    pub fn call(strike: Decimal, expiry: NaiveDate, premium: Decimal, delta: Decimal) -> Self {
        Self {
            id: format!("{}-{}-{}", expiry, OptionKind::Call, strike.normalize()),
            strike,
            expiry,
            premium_per_share: premium,
            delta_per_share: delta,
            kind: OptionKind::Call,
        }
    }

    /// Premium for one contract (O).
    pub fn premium_per_contract(&self) -> Decimal {
        self.premium_per_share * CONTRACT_MULTIPLIER
    }

    /// Delta exposure of one contract in share equivalents (D).
    pub fn delta_per_contract(&self) -> Decimal {
        self.delta_per_share * CONTRACT_MULTIPLIER
    }

    /// Human-readable description (e.g., "170C 2025-11-15").
    pub fn display_name(&self) -> String {
        format!("{}{} {}", self.strike.normalize(), self.kind, self.expiry)
    }
}

/// Underlying price snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub as_of: DateTime<Utc>,
}

/// Everything a chain source returns for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub quote: Quote,
    pub contracts: Vec<OptionContract>,
}

impl OptionChain {
    /// Sorted, de-duplicated expiries that have at least one call listed.
    pub fn expiries(&self) -> Vec<NaiveDate> {
        let mut expiries: Vec<NaiveDate> = self
            .contracts
            .iter()
            .filter(|c| c.kind == OptionKind::Call)
            .map(|c| c.expiry)
            .collect();
        expiries.sort_unstable();
        expiries.dedup();
        expiries
    }

    /// Look up a contract by id.
    pub fn contract(&self, id: &str) -> Option<&OptionContract> {
        self.contracts.iter().find(|c| c.id == id)
    }
}

/// User-supplied targets and filters for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationParameters {
    /// Capital to deploy (T).
    pub total_equity: Decimal,
    /// Desired leverage ratio (L). 1.0 means all capital in shares.
    pub target_leverage: Decimal,
    /// Only contracts with exactly this expiry are eligible.
    pub selected_expiry: NaiveDate,
    /// Inclusive lower bound on per-share delta.
    pub delta_min: Decimal,
    /// Inclusive upper bound on per-share delta.
    pub delta_max: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn per_contract_values_use_multiplier() {
        let c = OptionContract::call(dec!(170), date(2025, 11, 15), dec!(8.5), dec!(0.65));
        assert_eq!(c.premium_per_contract(), dec!(850));
        assert_eq!(c.delta_per_contract(), dec!(65));
    }

    #[test]
    fn call_id_and_display_name() {
        let c = OptionContract::call(dec!(170.00), date(2025, 11, 15), dec!(8.5), dec!(0.65));
        assert_eq!(c.id, "2025-11-15-C-170");
        assert_eq!(c.display_name(), "170C 2025-11-15");
    }

    #[test]
    fn expiries_are_sorted_unique_and_call_only() {
        let mut put = OptionContract::call(dec!(160), date(2025, 10, 17), dec!(2), dec!(0.3));
        put.kind = OptionKind::Put;
        put.id = "put".to_string();

        let chain = OptionChain {
            quote: Quote {
                symbol: "AAPL".to_string(),
                price: dec!(175.5),
                as_of: Utc::now(),
            },
            contracts: vec![
                OptionContract::call(dec!(170), date(2025, 12, 19), dec!(9), dec!(0.6)),
                OptionContract::call(dec!(170), date(2025, 11, 15), dec!(8.5), dec!(0.65)),
                OptionContract::call(dec!(175), date(2025, 11, 15), dec!(6), dec!(0.5)),
                put,
            ],
        };

        assert_eq!(chain.expiries(), vec![date(2025, 11, 15), date(2025, 12, 19)]);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&OptionKind::Call).unwrap();
        assert_eq!(json, "\"call\"");
    }
}
