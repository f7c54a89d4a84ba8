//! Pipeline orchestration for one generation run.
//!
//! STAGE ORDER (fixed, documented, never reordered):
//!   1. Entity catalog
//!   2. Base transaction synthesizer
//!   3. Fraud pattern injector
//!   4. Noise layer (duplicates, then missingness)
//!   5. Final shuffle
//!   6. Summary aggregator (consumes no randomness)
//!
//! RULES:
//!   - Each stage draws only from its own RngBank stream.
//!   - The whole run is a pure function of the configuration: same
//!     config, same bytes out.
//!   - A consistency violation after generation is a defect and aborts
//!     the run instead of emitting bad rows.

use crate::{
    catalog::{self, Customer},
    config::GeneratorConfig,
    error::{GenError, GenResult},
    injector, noise,
    rng::{RngBank, StageSlot},
    summary::{self, SummaryRecord},
    synthesizer::{self, Transaction},
};
use std::collections::HashMap;

/// The three output tables of one run.
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub summaries: Vec<SummaryRecord>,
}

/// Run the full pipeline for one configuration.
pub fn generate(config: &GeneratorConfig) -> GenResult<Dataset> {
    config.validate()?;
    let bank = RngBank::new(config.seed);

    let customers = catalog::generate_customers(
        config.num_customers,
        config.window_start,
        &mut bank.for_stage(StageSlot::Customer),
    )?;

    let mut transactions = synthesizer::generate_transactions(
        &customers,
        config.num_transactions,
        config.window_start,
        config.window_end,
        &mut bank.for_stage(StageSlot::Transaction),
    )?;

    injector::inject_fraud(
        &mut transactions,
        &customers,
        config,
        &mut bank.for_stage(StageSlot::Fraud),
    )?;

    noise::apply_noise(
        &mut transactions,
        config.duplicate_ratio,
        &config.missing_rates,
        &mut bank.for_stage(StageSlot::Noise),
    );
    noise::shuffle_transactions(&mut transactions, &mut bank.for_stage(StageSlot::Shuffle));

    verify_dataset(&customers, &transactions)?;

    let summaries = summary::summarize(&transactions, &customers);
    log::info!(
        "pipeline: {} customers, {} transactions, {} summaries",
        customers.len(),
        transactions.len(),
        summaries.len()
    );

    Ok(Dataset {
        customers,
        transactions,
        summaries,
    })
}

/// Internal-invariant sweep over a finished run. Everything checked
/// here holds by construction; a hit means the generator itself is
/// broken, so the run aborts instead of emitting the rows.
pub fn verify_dataset(customers: &[Customer], transactions: &[Transaction]) -> GenResult<()> {
    let by_id: HashMap<&str, &Customer> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();

    for txn in transactions {
        let violation = |detail: String| GenError::ConsistencyViolation {
            transaction_id: txn.transaction_id.clone(),
            detail,
        };

        let customer = by_id
            .get(txn.customer_id.as_str())
            .ok_or_else(|| violation(format!("owner {} is not in the catalog", txn.customer_id)))?;

        if !(txn.transaction_date <= txn.value_date
            && txn.value_date <= txn.payment_date
            && txn.payment_date <= txn.booking_date)
        {
            return Err(violation(format!(
                "date sequence decreases: {} / {} / {} / {}",
                txn.transaction_date, txn.value_date, txn.payment_date, txn.booking_date
            )));
        }

        if txn.currency != customer.currency {
            return Err(violation(format!(
                "currency {} does not match owner currency {}",
                txn.currency, customer.currency
            )));
        }

        if txn.amount <= 0.0 {
            return Err(violation(format!("non-positive amount {}", txn.amount)));
        }

        // The amount bound only binds the non-fraud path; fraud
        // patterns violate it on purpose.
        if !txn.is_fraud && txn.amount > customer.credit_limit {
            return Err(violation(format!(
                "amount {} above owner credit limit {}",
                txn.amount, customer.credit_limit
            )));
        }
    }
    Ok(())
}
