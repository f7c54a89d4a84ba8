//! Fraud pattern injector.
//!
//! Overlays a configured minority of transactions with anomalous
//! behavioral patterns and assigns the binary label by construction;
//! labels are never inferred after the fact.
//!
//! The in-place patterns (spike, burst, oversized transfer) transform
//! exactly `fraud_case_count` rows selected by index before any
//! mutation. Structuring groups are generated directly against the
//! catalog and appended on top as entirely new payment flows.

use crate::{
    catalog::Customer,
    config::GeneratorConfig,
    error::{GenError, GenResult},
    name_generator::NameGenerator,
    rng::StageRng,
    synthesizer::{Transaction, TransactionKind},
    types::{from_cents, round2, to_cents},
};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::collections::HashMap;

// ── Pattern constants ────────────────────────────────────────────────────────

/// Risk-flagged counterparty countries used by structuring groups.
pub const RISK_COUNTRIES: [&str; 4] = ["HK", "SG", "CN", "RU"];

/// Business lines structuring rows claim to originate from. The fixed
/// goods narrative deliberately mismatches them; the mismatch is the
/// anomaly signal, not a data error.
pub const STRUCTURING_BUSINESS_TYPES: [&str; 2] = ["Textile", "Consulting"];
pub const STRUCTURING_NARRATIVE: &str = "Invoice for electronic parts";

const STRUCTURING_PARENT_LOW: f64 = 200_000.0;
const STRUCTURING_PARENT_HIGH: f64 = 400_000.0;
const STRUCTURING_MIN_PARTS: u64 = 5;
const STRUCTURING_MAX_PARTS: u64 = 10;

const SPIKE_LOW: f64 = 0.8;
const SPIKE_HIGH: f64 = 1.2;
const OVERSIZED_LOW: f64 = 0.7;
const OVERSIZED_HIGH: f64 = 1.0;

/// The enumerated overlay policy. One handler per variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FraudPattern {
    /// Amount redrawn at or above the owner's normal ceiling.
    Spike,
    /// All four dates collapsed to the run's burst timestamp.
    Burst,
    /// Mobile transfer sized close to the full credit limit.
    OversizedTransfer,
    /// A large sum split into sub-threshold parts (appended, grouped).
    Structuring,
}

/// Patterns applied in place to selected base rows. Structuring is
/// excluded: its groups are appended, not transformed.
const IN_PLACE_PATTERNS: [FraudPattern; 3] = [
    FraudPattern::Spike,
    FraudPattern::Burst,
    FraudPattern::OversizedTransfer,
];

/// What the injector did, for logging and assertions.
#[derive(Debug, Clone, Copy)]
pub struct InjectionSummary {
    pub in_place_cases: usize,
    pub structuring_groups: usize,
    pub structuring_rows: usize,
}

/// All burst rows share one scripted-activity timestamp: 03:00 on the
/// first day of the campaign window.
pub fn burst_timestamp(config: &GeneratorConfig) -> NaiveDateTime {
    config.window_start.and_time(NaiveTime::MIN) + Duration::hours(3)
}

/// Transform `fraud_case_count` rows in place, then append the
/// configured structuring groups. Every row this function touches or
/// creates carries label 1; everything else keeps label 0.
pub fn inject_fraud(
    transactions: &mut Vec<Transaction>,
    customers: &[Customer],
    config: &GeneratorConfig,
    rng: &mut StageRng,
) -> GenResult<InjectionSummary> {
    if customers.is_empty() {
        return Err(GenError::EmptyCatalog);
    }

    let limits: HashMap<&str, f64> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.credit_limit))
        .collect();

    // Select by index before mutating anything, so exactly the
    // configured count is labeled, with no silent under- or over-labeling.
    let fraud_count = config.fraud_case_count();
    let selected = select_indices(transactions.len(), fraud_count, rng);

    let burst_ts = burst_timestamp(config);
    for &index in &selected {
        let txn = &mut transactions[index];
        let limit = *limits.get(txn.customer_id.as_str()).ok_or_else(|| {
            GenError::ConsistencyViolation {
                transaction_id: txn.transaction_id.clone(),
                detail: format!("owner {} is not in the catalog", txn.customer_id),
            }
        })?;

        match *rng.pick(&IN_PLACE_PATTERNS) {
            FraudPattern::Spike => apply_spike(txn, limit, rng),
            FraudPattern::Burst => apply_burst(txn, burst_ts),
            FraudPattern::OversizedTransfer => apply_oversized_transfer(txn, limit, rng),
            FraudPattern::Structuring => unreachable!("structuring is never applied in place"),
        }
        txn.is_fraud = true;
    }

    let mut structuring_rows = 0;
    for _ in 0..config.structuring_cases {
        let group = structuring_group(customers, config, rng);
        structuring_rows += group.len();
        transactions.extend(group);
    }

    let summary = InjectionSummary {
        in_place_cases: selected.len(),
        structuring_groups: config.structuring_cases,
        structuring_rows,
    };
    log::info!(
        "injector: {} in-place cases, {} structuring groups ({} rows)",
        summary.in_place_cases,
        summary.structuring_groups,
        summary.structuring_rows
    );
    Ok(summary)
}

/// Partial Fisher–Yates: the first `count` entries of a shuffled index
/// vector, returned in ascending order for a stable mutation pass.
fn select_indices(len: usize, count: usize, rng: &mut StageRng) -> Vec<usize> {
    debug_assert!(count <= len, "validated: fraud fraction is at most 1");
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..count {
        let j = i + rng.next_u64_below((len - i) as u64) as usize;
        indices.swap(i, j);
    }
    let mut selected = indices[..count].to_vec();
    selected.sort_unstable();
    selected
}

// ── One handler per pattern variant ─────────────────────────────────────────

/// The one place the amount invariant is intentionally violated; the
/// violation is the labeled signal.
fn apply_spike(txn: &mut Transaction, credit_limit: f64, rng: &mut StageRng) {
    txn.amount = round2(rng.uniform(SPIKE_LOW * credit_limit, SPIKE_HIGH * credit_limit));
}

fn apply_burst(txn: &mut Transaction, burst_ts: NaiveDateTime) {
    txn.transaction_date = burst_ts;
    txn.value_date = burst_ts;
    txn.payment_date = burst_ts;
    txn.booking_date = burst_ts;
}

/// Oversized transfers only exist on the mobile-transfer archetype, so
/// the handler coerces the row to that archetype rather than skipping
/// it and under-filling the configured label count.
fn apply_oversized_transfer(txn: &mut Transaction, credit_limit: f64, rng: &mut StageRng) {
    txn.kind = TransactionKind::mobile_transfer();
    if let Some(counterparty) = &txn.counterparty_name {
        txn.narrative = Some(txn.kind.narrative(counterparty));
    }
    txn.amount = round2(rng.uniform(OVERSIZED_LOW * credit_limit, OVERSIZED_HIGH * credit_limit));
}

/// One structuring group: a parent amount split into near-equal parts
/// that sum to it exactly (integer cents; remainder absorbed into the
/// last part), sharing a parent-invoice reference, clustered on
/// successive days, routed to a risk-flagged country.
fn structuring_group(
    customers: &[Customer],
    config: &GeneratorConfig,
    rng: &mut StageRng,
) -> Vec<Transaction> {
    let customer = rng.pick(customers);
    let parent_cents = to_cents(round2(
        rng.uniform(STRUCTURING_PARENT_LOW, STRUCTURING_PARENT_HIGH),
    ));
    let parts = (STRUCTURING_MIN_PARTS
        + rng.next_u64_below(STRUCTURING_MAX_PARTS - STRUCTURING_MIN_PARTS + 1))
        as i64;
    let part_cents = parent_cents / parts;

    let parent_ref = rng.next_uuid().to_string();
    let counterparty = NameGenerator::company(rng);
    let counterparty_country = (*rng.pick(&RISK_COUNTRIES)).to_string();
    let business_type = (*rng.pick(&STRUCTURING_BUSINESS_TYPES)).to_string();

    let window_start = config.window_start.and_time(NaiveTime::MIN);
    let span_seconds =
        (config.window_end.and_time(NaiveTime::MIN) - window_start).num_seconds();
    let first_date = window_start
        + Duration::seconds(rng.next_u64_below(span_seconds as u64 + 1) as i64);

    (0..parts)
        .map(|i| {
            let amount_cents = if i == parts - 1 {
                parent_cents - part_cents * (parts - 1)
            } else {
                part_cents
            };
            // Same-day settlement, one part per successive day.
            let date = first_date + Duration::days(i);
            Transaction {
                transaction_id: rng.next_uuid().to_string(),
                customer_id: customer.customer_id.clone(),
                currency: customer.currency.clone(),
                transaction_date: date,
                value_date: date,
                payment_date: date,
                booking_date: date,
                kind: TransactionKind::Wire,
                narrative: Some(STRUCTURING_NARRATIVE.to_string()),
                counterparty_name: Some(counterparty.clone()),
                counterparty_country: counterparty_country.clone(),
                business_type: Some(business_type.clone()),
                amount: from_cents(amount_cents),
                status: "billed".to_string(),
                parent_invoice_ref: Some(parent_ref.clone()),
                is_fraud: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StageSlot};

    #[test]
    fn select_indices_is_exact_and_distinct() {
        let mut rng = RngBank::new(21).for_stage(StageSlot::Fraud);
        let selected = select_indices(1000, 20, &mut rng);
        assert_eq!(selected.len(), 20);
        let mut dedup = selected.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), 20, "indices must be distinct");
        assert!(selected.windows(2).all(|w| w[0] < w[1]), "ascending order");
        assert!(*selected.last().unwrap() < 1000);
    }

    #[test]
    fn select_indices_handles_edge_counts() {
        let mut rng = RngBank::new(4).for_stage(StageSlot::Fraud);
        assert!(select_indices(10, 0, &mut rng).is_empty());
        assert_eq!(select_indices(10, 10, &mut rng).len(), 10);
    }

    #[test]
    fn structuring_parts_sum_exactly_to_the_parent() {
        let config = GeneratorConfig::default_test();
        let mut customer_rng = RngBank::new(config.seed).for_stage(StageSlot::Customer);
        let customers = crate::catalog::generate_customers(
            10,
            config.window_start,
            &mut customer_rng,
        )
        .unwrap();

        let mut rng = RngBank::new(config.seed).for_stage(StageSlot::Fraud);
        for _ in 0..50 {
            let group = structuring_group(&customers, &config, &mut rng);
            assert!((5..=10).contains(&group.len()), "part count {}", group.len());

            let total_cents: i64 = group.iter().map(|t| to_cents(t.amount)).sum();
            assert!(
                (to_cents(STRUCTURING_PARENT_LOW)..=to_cents(STRUCTURING_PARENT_HIGH))
                    .contains(&total_cents),
                "parent sum out of range: {total_cents}"
            );

            let parent_ref = group[0].parent_invoice_ref.as_deref().unwrap();
            for (i, part) in group.iter().enumerate() {
                assert_eq!(part.parent_invoice_ref.as_deref(), Some(parent_ref));
                assert!(part.is_fraud);
                assert!(RISK_COUNTRIES.contains(&part.counterparty_country.as_str()));
                assert_eq!(part.narrative.as_deref(), Some(STRUCTURING_NARRATIVE));
                assert_eq!(
                    part.transaction_date,
                    group[0].transaction_date + Duration::days(i as i64),
                    "parts must fall on successive days"
                );
            }
        }
    }
}
