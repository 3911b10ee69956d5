use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Malformed requirements: {0}")]
    RequestShape(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
