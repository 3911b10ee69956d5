use thiserror::Error;

/// Failure of a single ranking attempt. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("Reasoning transport error: {0}")]
    Transport(String),
    #[error("Reasoning call timed out: {0}")]
    Timeout(String),
    #[error("Reasoning endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed invoke response: {0}")]
    Envelope(String),
    #[error("Generated text is not valid recommendation JSON: {0}")]
    Payload(String),
    #[error("Unexpected recommendation shape: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for ReasoningError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ReasoningError::Timeout(e.to_string())
        } else {
            ReasoningError::Transport(e.to_string())
        }
    }
}
