use chrono::NaiveDate;
use thiserror::Error;

/// Error taxonomy for a generation run.
///
/// Configuration variants are rejected by `GeneratorConfig::validate`
/// before any generation starts. Consistency variants indicate a defect
/// in the generator itself and abort the run; they are never recovered
/// from or retried.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid {field}: expected a positive count, got {value}")]
    InvalidCount { field: &'static str, value: i64 },

    #[error("Invalid {field}: expected a ratio in [0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },

    #[error("Campaign window is inverted: {start} is after {end}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("Structuring case count {structuring} exceeds fraud case count {fraud}")]
    StructuringExceedsFraud { structuring: usize, fraud: usize },

    #[error("Customer catalog is empty: cannot sample an owning customer")]
    EmptyCatalog,

    #[error("Consistency violation in transaction {transaction_id}: {detail}")]
    ConsistencyViolation {
        transaction_id: String,
        detail: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenError {
    /// True for errors the caller caused (bad configuration), as
    /// opposed to generator defects or I/O failures.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCount { .. }
                | Self::RatioOutOfRange { .. }
                | Self::InvertedWindow { .. }
                | Self::StructuringExceedsFraud { .. }
                | Self::EmptyCatalog
        )
    }
}

pub type GenResult<T> = Result<T, GenError>;
