use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubwordError {
    #[error("Invalid retention proportion {name}={value}: expected 0 < p <= 1")]
    InvalidProportion { name: String, value: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Corpus contains no words")]
    EmptyCorpus,
    #[error("Input error: {0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SubwordError>;
