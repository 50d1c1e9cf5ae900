//! ot-results: run store, timeseries storage and CSV export.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::write_csv;
pub use hash::compute_run_id;
pub use store::{RunStore, history_from_records, records_from_history};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Corrupt run {run_id}: {message}")]
    Corrupt { run_id: String, message: String },

    #[error("Run {run_id} has a non-finite temperature at step {step}; not stored")]
    NonFinite { run_id: String, step: usize },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
