use thiserror::Error;

use crate::credit::record::CreditState;

#[derive(Debug, Error)]
pub enum GreenCreditError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid transition: cannot {action} a credit in state {from}")]
    InvalidTransition { from: CreditState, action: String },

    #[error("Payment rejected: {0}")]
    PaymentRejected(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for GreenCreditError {
    fn from(e: serde_json::Error) -> Self {
        GreenCreditError::SerializationError(e.to_string())
    }
}
