use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for BoardsError {
    fn from(err: serde_json::Error) -> Self {
        BoardsError::Serialization(err.to_string())
    }
}
