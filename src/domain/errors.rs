use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid order: {0}")]
    Validation(String),
    #[error("Order {0} not found")]
    NotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
}
