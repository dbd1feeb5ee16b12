use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("unknown log format `{0}`; expected text, json or journald")]
    UnknownFormat(String),
    #[error("journald output requires Linux and the `journald` feature")]
    JournaldUnavailable,
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
    #[error("cannot install log subscriber: {0}")]
    Install(String),
    #[error("invalid log filter `{0}`")]
    InvalidFilter(String),
}
