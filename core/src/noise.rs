//! Noise layer: duplicate submissions, field-level missingness, and
//! the final shuffle.
//!
//! Duplicates are exact copies (same identifier, same label) taken
//! from the set as it stood before duplication. Missingness is an
//! independent per-record Bernoulli trial per configured field, applied
//! across the combined set. The closing permutation keeps downstream
//! consumers from inferring the label distribution from row order.

use crate::{config::MissingFieldRates, rng::StageRng, synthesizer::Transaction};

#[derive(Debug, Clone, Copy)]
pub struct NoiseSummary {
    pub duplicates: usize,
    pub blanked_counterparty_names: usize,
    pub blanked_narratives: usize,
    pub blanked_business_types: usize,
}

/// Append duplicates and blank fields in place. Shuffling is a separate
/// call so it can draw from its own stage stream.
pub fn apply_noise(
    transactions: &mut Vec<Transaction>,
    duplicate_ratio: f64,
    missing: &MissingFieldRates,
    rng: &mut StageRng,
) -> NoiseSummary {
    // Duplicate-submission noise: sampled with replacement from the
    // pre-duplication set, cloned verbatim and never re-identified.
    let base_len = transactions.len();
    let duplicate_count = (duplicate_ratio * base_len as f64).round() as usize;
    for _ in 0..duplicate_count {
        let index = rng.next_u64_below(base_len as u64) as usize;
        let copy = transactions[index].clone();
        transactions.push(copy);
    }

    let mut summary = NoiseSummary {
        duplicates: duplicate_count,
        blanked_counterparty_names: 0,
        blanked_narratives: 0,
        blanked_business_types: 0,
    };

    for txn in transactions.iter_mut() {
        if rng.chance(missing.counterparty_name) {
            txn.counterparty_name = None;
            summary.blanked_counterparty_names += 1;
        }
        if rng.chance(missing.narrative) {
            txn.narrative = None;
            summary.blanked_narratives += 1;
        }
        if rng.chance(missing.business_type) {
            txn.business_type = None;
            summary.blanked_business_types += 1;
        }
    }

    log::info!(
        "noise: {} duplicates, blanked {}/{}/{} counterparty/narrative/business fields",
        summary.duplicates,
        summary.blanked_counterparty_names,
        summary.blanked_narratives,
        summary.blanked_business_types
    );
    summary
}

/// Final full permutation of the combined set. Reorders rows, never
/// alters them.
pub fn shuffle_transactions(transactions: &mut [Transaction], rng: &mut StageRng) {
    rng.shuffle(transactions);
}
