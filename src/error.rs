use thiserror::Error;

/// Errors produced by the generic collection actor framework.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store channel closed")]
    ChannelClosed,
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("order validation error: {0}")]
    ValidationError(String),
    #[error("order store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("user validation error: {0}")]
    ValidationError(String),
    #[error("user store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum MessageError {
    #[error("message not found: {0}")]
    NotFound(String),
    #[error("message validation error: {0}")]
    ValidationError(String),
    #[error("message store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum ReviewError {
    #[error("review not found: {0}")]
    NotFound(String),
    #[error("review validation error: {0}")]
    ValidationError(String),
    #[error("review store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced by the admin console.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("order operation failed: {0}")]
    Order(#[from] OrderError),
    #[error("user operation failed: {0}")]
    User(#[from] UserError),
    #[error("message operation failed: {0}")]
    Message(#[from] MessageError),
    #[error("review operation failed: {0}")]
    Review(#[from] ReviewError),
}
