use thiserror::Error;

pub type OtResult<T> = Result<T, OtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
