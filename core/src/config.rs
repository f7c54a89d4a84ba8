//! Run configuration: plain scalars, validated before generation starts.

use crate::error::{GenError, GenResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-field blanking probabilities applied by the noise layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MissingFieldRates {
    pub counterparty_name: f64,
    pub narrative: f64,
    pub business_type: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Master seed. Every stage RNG stream derives from it.
    pub seed: u64,
    pub num_customers: usize,
    pub num_transactions: usize,
    /// Campaign window: base transaction dates are sampled inside it.
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Fraction of base transactions transformed in place into fraud.
    pub fraud_fraction: f64,
    /// Fraction of the combined set appended again as exact duplicates.
    pub duplicate_ratio: f64,
    /// Number of structuring groups appended on top of the in-place cases.
    pub structuring_cases: usize,
    pub missing_rates: MissingFieldRates,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        // Reference campaign: 1 000 customers, 10 717 transactions over
        // a three-month window, 2% fraud, 1% duplicates.
        Self {
            seed: 42,
            num_customers: 1_000,
            num_transactions: 10_717,
            window_start: ymd(2025, 4, 2),
            window_end: ymd(2025, 7, 2),
            fraud_fraction: 0.02,
            duplicate_ratio: 0.01,
            structuring_cases: 5,
            missing_rates: MissingFieldRates {
                counterparty_name: 0.05,
                narrative: 0.05,
                business_type: 0.03,
            },
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("literal calendar date")
}

impl GeneratorConfig {
    /// Number of base transactions transformed in place and labeled 1.
    pub fn fraud_case_count(&self) -> usize {
        (self.fraud_fraction * self.num_transactions as f64).round() as usize
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &str) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    /// Fail fast on anything generation cannot honor. Called by the
    /// pipeline before the first record is produced.
    pub fn validate(&self) -> GenResult<()> {
        if self.num_customers == 0 {
            return Err(GenError::InvalidCount {
                field: "num_customers",
                value: 0,
            });
        }
        if self.num_transactions == 0 {
            return Err(GenError::InvalidCount {
                field: "num_transactions",
                value: 0,
            });
        }
        for (field, value) in [
            ("fraud_fraction", self.fraud_fraction),
            ("duplicate_ratio", self.duplicate_ratio),
            ("missing_rates.counterparty_name", self.missing_rates.counterparty_name),
            ("missing_rates.narrative", self.missing_rates.narrative),
            ("missing_rates.business_type", self.missing_rates.business_type),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenError::RatioOutOfRange { field, value });
            }
        }
        if self.window_start > self.window_end {
            return Err(GenError::InvertedWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }
        let fraud_cases = self.fraud_case_count();
        if self.structuring_cases > fraud_cases {
            return Err(GenError::StructuringExceedsFraud {
                structuring: self.structuring_cases,
                fraud: fraud_cases,
            });
        }
        Ok(())
    }

    /// Small configuration for unit tests: quick to generate, still
    /// exercises every stage.
    pub fn default_test() -> Self {
        Self {
            seed: 1234,
            num_customers: 40,
            num_transactions: 500,
            structuring_cases: 2,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GeneratorConfig::default().validate().expect("default config");
        GeneratorConfig::default_test().validate().expect("test config");
    }

    #[test]
    fn zero_customers_is_rejected() {
        let config = GeneratorConfig {
            num_customers: 0,
            ..GeneratorConfig::default_test()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration(), "expected configuration error, got {err}");
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = GeneratorConfig {
                fraud_fraction: bad,
                ..GeneratorConfig::default_test()
            };
            assert!(config.validate().is_err(), "fraud_fraction={bad} accepted");
        }
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut config = GeneratorConfig::default_test();
        std::mem::swap(&mut config.window_start, &mut config.window_end);
        assert!(config.validate().is_err());
    }

    #[test]
    fn structuring_cannot_exceed_fraud_cases() {
        let config = GeneratorConfig {
            structuring_cases: 10_000,
            ..GeneratorConfig::default_test()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            GenError::StructuringExceedsFraud { .. }
        ));
    }

    #[test]
    fn fraud_case_count_rounds_to_nearest() {
        let config = GeneratorConfig {
            num_transactions: 10_717,
            fraud_fraction: 0.02,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.fraud_case_count(), 214);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GeneratorConfig::default();
        let text = serde_json::to_string(&config).expect("serialize");
        let back = GeneratorConfig::from_json(&text).expect("parse");
        assert_eq!(back.seed, config.seed);
        assert_eq!(back.window_start, config.window_start);
        assert_eq!(back.num_transactions, config.num_transactions);
    }
}
