use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid job id: {0}")]
    InvalidJobId(String),
    #[error("periodic interval must be greater than zero")]
    ZeroInterval,
}
