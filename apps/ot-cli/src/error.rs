use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Project(#[from] ot_project::ProjectError),

    #[error(transparent)]
    Sim(#[from] ot_sim::SimError),

    #[error(transparent)]
    Results(#[from] ot_results::ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid node number {0}: expected 1..=15")]
    InvalidNode(u8),
}
