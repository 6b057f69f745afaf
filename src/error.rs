use thiserror::Error;

#[derive(Error, Debug)]
pub enum KleError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout Decode Error: {0}")]
    Decode(String),

    #[error("Invariant Violation: {0}")]
    Invariant(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<json5::Error> for KleError {
    fn from(e: json5::Error) -> Self {
        KleError::Decode(e.to_string())
    }
}

pub type KtResult<T> = Result<T, KleError>;
