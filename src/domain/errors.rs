use thiserror::Error;

use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Order number {0} is already taken")]
    DuplicateOrderNumber(String),
    #[error("No free order number after {0} attempts")]
    OrderNumberExhausted(u32),
    #[error("Internal error: {0}")]
    Internal(String),
}
