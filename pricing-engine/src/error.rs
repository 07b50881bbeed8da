//! Engine errors

use thiserror::Error;

/// Errors surfaced by draft mutations and finalization
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Line not found: {0}")]
    LineNotFound(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    #[error("Unknown catalog product: {0}")]
    UnknownProduct(String),

    #[error("Outstanding balance of {remaining} blocks direct sale finalization")]
    UnpaidBalance { remaining: f64 },
}
