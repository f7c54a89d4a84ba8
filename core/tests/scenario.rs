//! The reference campaign: seed=42, 1 000 customers, 10 717 base
//! transactions, 2% fraud, 1% duplicates, 5 structuring groups.
//! Pins the row accounting and the summary-table arithmetic end to end.

use fraudgen_core::{
    catalog, injector, noise, pipeline,
    rng::{RngBank, StageSlot},
    types::round2,
    GeneratorConfig,
};
use std::collections::HashMap;

#[test]
fn reference_campaign_row_accounting() {
    let config = GeneratorConfig::default();
    assert_eq!(config.seed, 42);
    assert_eq!(config.num_customers, 1_000);
    assert_eq!(config.num_transactions, 10_717);
    assert_eq!(config.fraud_case_count(), 214);

    // Replay the stages the way the pipeline wires them.
    let bank = RngBank::new(config.seed);
    let customers = catalog::generate_customers(
        config.num_customers,
        config.window_start,
        &mut bank.for_stage(StageSlot::Customer),
    )
    .expect("catalog");
    let mut transactions = fraudgen_core::synthesizer::generate_transactions(
        &customers,
        config.num_transactions,
        config.window_start,
        config.window_end,
        &mut bank.for_stage(StageSlot::Transaction),
    )
    .expect("synthesizer");
    assert_eq!(transactions.len(), 10_717);

    let summary = injector::inject_fraud(
        &mut transactions,
        &customers,
        &config,
        &mut bank.for_stage(StageSlot::Fraud),
    )
    .expect("injector");
    assert_eq!(summary.in_place_cases, 214);
    assert_eq!(summary.structuring_groups, 5);

    let combined_len = transactions.len();
    assert_eq!(combined_len, 10_717 + summary.structuring_rows);

    let noise_summary = noise::apply_noise(
        &mut transactions,
        config.duplicate_ratio,
        &config.missing_rates,
        &mut bank.for_stage(StageSlot::Noise),
    );
    let expected_duplicates = (0.01 * combined_len as f64).round() as usize;
    assert_eq!(noise_summary.duplicates, expected_duplicates);
    assert_eq!(transactions.len(), combined_len + expected_duplicates);

    // The staged replay and the pipeline must agree row for row.
    let dataset = pipeline::generate(&config).expect("pipeline run");
    assert_eq!(dataset.transactions.len(), transactions.len());

    let mut staged_ids: Vec<&str> = transactions
        .iter()
        .map(|t| t.transaction_id.as_str())
        .collect();
    let mut pipeline_ids: Vec<&str> = dataset
        .transactions
        .iter()
        .map(|t| t.transaction_id.as_str())
        .collect();
    staged_ids.sort_unstable();
    pipeline_ids.sort_unstable();
    assert_eq!(staged_ids, pipeline_ids);

    // At least the 214 in-place cases plus the structuring parts carry
    // label 1; duplicates of fraud rows can only add to that.
    let fraud_rows = dataset.transactions.iter().filter(|t| t.is_fraud).count();
    assert!(fraud_rows >= 214 + summary.structuring_rows);
}

#[test]
fn summary_table_matches_the_transaction_table() {
    let dataset = pipeline::generate(&GeneratorConfig::default()).expect("run");

    assert!(
        dataset.summaries.len() <= 1_000,
        "at most one summary row per customer"
    );

    let mut volumes: HashMap<&str, f64> = HashMap::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for txn in &dataset.transactions {
        *volumes.entry(txn.customer_id.as_str()).or_default() += txn.amount;
        *counts.entry(txn.customer_id.as_str()).or_default() += 1;
    }
    assert_eq!(dataset.summaries.len(), volumes.len());

    for record in &dataset.summaries {
        let id = record.customer_id.as_str();
        assert_eq!(
            record.total_volume,
            round2(volumes[id]),
            "total_volume mismatch for {id}"
        );
        assert_eq!(record.transaction_count, counts[id]);
        assert!(record.min_amount <= record.avg_amount);
        assert!(record.avg_amount <= record.max_amount);
    }
}
