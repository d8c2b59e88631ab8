use lev_alloc_chain::{ChainSource, JsonFileChainSource, SampleChainSource};
use lev_alloc_core::{AllocationParameters, COST_TOLERANCE};
use lev_alloc_solver::optimize;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_sample_chain_end_to_end() {
    let chain = SampleChainSource::new()
        .fetch_chain("AAPL")
        .await
        .expect("sample chain");

    let params = AllocationParameters {
        total_equity: dec!(10000),
        target_leverage: dec!(1.75),
        selected_expiry: chain.expiries()[0],
        delta_min: dec!(0.3),
        delta_max: dec!(0.9),
    };

    let outcome = optimize(&chain.contracts, &chain.quote, &params);

    let best = outcome.optimal.expect("a feasible allocation");
    assert_eq!(best.contracts_count, dec!(1));
    assert!((best.total_cost - params.total_equity).abs() <= COST_TOLERANCE);
    assert!(outcome
        .results
        .iter()
        .all(|r| r.contract.expiry == params.selected_expiry));
}

#[tokio::test]
async fn test_json_chain_matches_sample_results() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = JsonFileChainSource::new(dir.path().join("aapl.json"));

    let sample = SampleChainSource::new().fetch_chain("AAPL").await.unwrap();
    file.save(&sample).await.unwrap();
    let loaded = file.fetch_chain("AAPL").await.unwrap();

    let params = AllocationParameters {
        total_equity: dec!(50000),
        target_leverage: dec!(2.5),
        selected_expiry: sample.expiries()[1],
        delta_min: dec!(0.4),
        delta_max: dec!(0.8),
    };

    assert_eq!(
        optimize(&sample.contracts, &sample.quote, &params),
        optimize(&loaded.contracts, &loaded.quote, &params)
    );
}
