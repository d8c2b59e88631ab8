//! Built-in sample chain for demos and tests.
//!
//! A fixed AAPL snapshot with two monthly expiries. Prices and deltas are
//! plausible mid-market values, not live data.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use lev_alloc_core::{OptionChain, OptionContract, OptionKind, Quote};

use crate::source::{check_chain, ChainError, ChainSource};

/// Underlying for which the sample chain exists.
pub const SAMPLE_SYMBOL: &str = "AAPL";

/// (strike, call premium, call delta, put premium) per expiry.
const NOVEMBER: [(Decimal, Decimal, Decimal, Decimal); 9] = [
    (dec!(150), dec!(27.10), dec!(0.92), dec!(0.85)),
    (dec!(160), dec!(18.40), dec!(0.81), dec!(2.05)),
    (dec!(165), dec!(14.35), dec!(0.74), dec!(3.10)),
    (dec!(170), dec!(8.50), dec!(0.65), dec!(4.60)),
    (dec!(175), dec!(7.85), dec!(0.53), dec!(6.70)),
    (dec!(180), dec!(5.20), dec!(0.42), dec!(9.35)),
    (dec!(185), dec!(3.30), dec!(0.31), dec!(12.60)),
    (dec!(190), dec!(1.95), dec!(0.21), dec!(16.30)),
    (dec!(200), dec!(0.60), dec!(0.08), dec!(25.40)),
];

const DECEMBER: [(Decimal, Decimal, Decimal, Decimal); 9] = [
    (dec!(150), dec!(29.05), dec!(0.88), dec!(1.70)),
    (dec!(160), dec!(20.90), dec!(0.77), dec!(3.40)),
    (dec!(165), dec!(17.20), dec!(0.70), dec!(4.75)),
    (dec!(170), dec!(13.85), dec!(0.63), dec!(6.35)),
    (dec!(175), dec!(10.90), dec!(0.54), dec!(8.40)),
    (dec!(180), dec!(8.35), dec!(0.46), dec!(10.80)),
    (dec!(185), dec!(6.20), dec!(0.38), dec!(13.65)),
    (dec!(190), dec!(4.50), dec!(0.30), dec!(16.90)),
    (dec!(200), dec!(2.20), dec!(0.17), dec!(24.55)),
];

/// Serves the fixed sample snapshot, optionally re-priced.
#[derive(Debug, Clone)]
pub struct SampleChainSource {
    price: Decimal,
    as_of: DateTime<Utc>,
}

impl SampleChainSource {
    pub fn new() -> Self {
        Self {
            price: dec!(175.5),
            as_of: Utc
                .with_ymd_and_hms(2025, 10, 1, 14, 30, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    /// Same contracts against a different underlying price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    fn build(&self) -> OptionChain {
        let mut contracts = Vec::with_capacity(2 * (NOVEMBER.len() + DECEMBER.len()));
        for (expiry, rows) in [
            (NaiveDate::from_ymd_opt(2025, 11, 15), &NOVEMBER),
            (NaiveDate::from_ymd_opt(2025, 12, 19), &DECEMBER),
        ] {
            let Some(expiry) = expiry else { continue };
            for &(strike, call_premium, call_delta, put_premium) in rows.iter() {
                contracts.push(OptionContract::call(strike, expiry, call_premium, call_delta));
                contracts.push(OptionContract {
                    id: format!("{}-{}-{}", expiry, OptionKind::Put, strike.normalize()),
                    strike,
                    expiry,
                    premium_per_share: put_premium,
                    delta_per_share: Decimal::ONE - call_delta,
                    kind: OptionKind::Put,
                });
            }
        }

        OptionChain {
            quote: Quote {
                symbol: SAMPLE_SYMBOL.to_string(),
                price: self.price,
                as_of: self.as_of,
            },
            contracts,
        }
    }
}

impl Default for SampleChainSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainSource for SampleChainSource {
    async fn fetch_chain(&self, symbol: &str) -> Result<OptionChain, ChainError> {
        debug!(symbol, price = %self.price, "Serving sample chain");
        check_chain(symbol, self.build())
    }

    fn name(&self) -> &str {
        "sample"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_is_deterministic() {
        let source = SampleChainSource::new();
        let a = source.fetch_chain("AAPL").await.unwrap();
        let b = source.fetch_chain("AAPL").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.contracts.len(), 36);
    }

    #[tokio::test]
    async fn sample_contains_reference_contract() {
        let chain = SampleChainSource::new().fetch_chain("AAPL").await.unwrap();
        let c = chain.contract("2025-11-15-C-170").unwrap();
        assert_eq!(c.premium_per_share, dec!(8.50));
        assert_eq!(c.delta_per_share, dec!(0.65));
        assert_eq!(chain.quote.price, dec!(175.5));
        assert_eq!(chain.expiries().len(), 2);
    }

    #[tokio::test]
    async fn other_symbols_are_rejected() {
        let err = SampleChainSource::new().fetch_chain("TSLA").await.unwrap_err();
        assert!(matches!(err, ChainError::SymbolMismatch { .. }));
    }

    #[tokio::test]
    async fn reprices_underlying() {
        let chain = SampleChainSource::new()
            .with_price(dec!(180))
            .fetch_chain("AAPL")
            .await
            .unwrap();
        assert_eq!(chain.quote.price, dec!(180));
    }
}
