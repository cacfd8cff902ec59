//! Application layer errors

use thiserror::Error;

use crate::domain::entities::ProductId;

/// Chat transport errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl BotError {
    /// Timeouts and network-class failures may succeed on a later attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Network(_) | BotError::Timeout(_))
    }
}

/// Order store errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Store rejected insert ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Product list validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no products")]
    Empty,

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Cart operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}

/// Payload that does not name a known action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized action: {0}")]
pub struct ParseActionError(pub String);
