use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub allocation: AllocationDefaults,
    pub chain: ChainConfig,
}

/// Starting values for the allocation parameters; CLI flags override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDefaults {
    pub total_equity: Decimal,
    pub target_leverage: Decimal,
    pub delta_min: Decimal,
    pub delta_max: Decimal,
    /// Falls back to the earliest call expiry in the chain when unset.
    #[serde(default)]
    pub selected_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub source: ChainSourceKind,
    /// Chain document path, required for `json_file`.
    #[serde(default)]
    pub path: Option<String>,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainSourceKind {
    Sample,
    JsonFile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            allocation: AllocationDefaults {
                total_equity: dec!(10000),
                target_leverage: dec!(1.5),
                delta_min: dec!(0.3),
                delta_max: dec!(0.9),
                selected_expiry: None,
            },
            chain: ChainConfig {
                source: ChainSourceKind::Sample,
                path: None,
                symbol: "AAPL".to_string(),
            },
        }
    }
}
