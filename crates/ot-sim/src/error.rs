//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while preparing or running an orbit simulation.
///
/// Configuration problems are reported before the first step; once the
/// integrator starts it runs to completion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid scenario '{value}': expected one of 'hot', 'cold'")]
    InvalidScenario { value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ot_project::ValidationError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] ot_core::OtError),
}

pub type SimResult<T> = Result<T, SimError>;
