//! fraudgen-core: deterministic synthesis of labeled AML/fraud datasets.
//!
//! One-shot batch generator. A seeded run produces three tables
//! (customers, transactions, per-customer summaries) with a configured
//! minority of transactions transformed into known laundering patterns
//! (amount spikes, timestamp bursts, oversized mobile transfers,
//! structuring) and realistic noise (duplicate rows, missing fields)
//! layered on top. Identical configuration always reproduces identical
//! output, byte for byte.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod injector;
pub mod name_generator;
pub mod noise;
pub mod pipeline;
pub mod rng;
pub mod summary;
pub mod synthesizer;
pub mod types;

pub use config::{GeneratorConfig, MissingFieldRates};
pub use error::{GenError, GenResult};
pub use pipeline::{generate, Dataset};
