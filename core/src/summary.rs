//! Summary aggregator: per-customer statistics joined against the
//! customer's balance and credit data.
//!
//! Derived, read-only output, recomputed from the transaction table
//! and never mutated independently. Customers with zero transactions do
//! not appear (no zero-row synthesis).

use crate::{
    catalog::Customer,
    synthesizer::Transaction,
    types::{round2, CustomerId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub customer_id: CustomerId,
    pub total_volume: f64,
    pub avg_amount: f64,
    pub max_amount: f64,
    pub min_amount: f64,
    pub transaction_count: usize,
    pub last_transaction_date: NaiveDateTime,
    pub available_balance: f64,
    pub credit_limit: f64,
    pub country: String,
    pub currency: String,
}

struct Accumulator {
    sum: f64,
    max: f64,
    min: f64,
    count: usize,
    last_date: NaiveDateTime,
}

/// One record per customer appearing in `transactions`, in customer-id
/// order. All numeric outputs rounded to two decimals.
pub fn summarize(transactions: &[Transaction], customers: &[Customer]) -> Vec<SummaryRecord> {
    // BTreeMap keeps the output order deterministic.
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for txn in transactions {
        groups
            .entry(txn.customer_id.as_str())
            .and_modify(|acc| {
                acc.sum += txn.amount;
                acc.max = acc.max.max(txn.amount);
                acc.min = acc.min.min(txn.amount);
                acc.count += 1;
                acc.last_date = acc.last_date.max(txn.transaction_date);
            })
            .or_insert(Accumulator {
                sum: txn.amount,
                max: txn.amount,
                min: txn.amount,
                count: 1,
                last_date: txn.transaction_date,
            });
    }

    let by_id: BTreeMap<&str, &Customer> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();

    groups
        .into_iter()
        .map(|(customer_id, acc)| {
            let customer = by_id.get(customer_id);
            SummaryRecord {
                customer_id: customer_id.to_string(),
                total_volume: round2(acc.sum),
                avg_amount: round2(acc.sum / acc.count as f64),
                max_amount: round2(acc.max),
                min_amount: round2(acc.min),
                transaction_count: acc.count,
                last_transaction_date: acc.last_date,
                available_balance: customer.map_or(0.0, |c| c.available_balance),
                credit_limit: customer.map_or(0.0, |c| c.credit_limit),
                country: customer.map_or_else(String::new, |c| c.country.clone()),
                currency: customer.map_or_else(String::new, |c| c.currency.clone()),
            }
        })
        .collect()
}
