use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<csv::Error> for DomainError {
    fn from(e: csv::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}
