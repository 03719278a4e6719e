use thiserror::Error;

/// Failures at the crate boundary. Recognition itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid engine configuration: {0}")]
    Config(String),

    #[error("unknown gesture label `{0}`")]
    UnknownGesture(String),

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("replay line {line}: {reason}")]
    Replay { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
