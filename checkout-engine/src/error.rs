//! Engine error taxonomy
//!
//! Every variant is a local validation failure on a single operation.
//! Operations validate fully before applying anything, so a returned error
//! never leaves an entity partially mutated. Nothing is retried
//! automatically; callers decide (e.g. re-attempting `finalize` after the
//! remaining payments arrive).

use shared::error::{CommandError, ErrorCode};
use thiserror::Error;

/// Engine errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("payment method does not match a known gateway: {0}")]
    PaymentMismatch(String),

    #[error("payment gateway is unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("delivery address is not verified")]
    UnverifiedAddress,

    #[error("cannot cancel order in {0} status")]
    IllegalCancellation(String),

    #[error("community order is no longer gathering")]
    AlreadyGathered,

    #[error("organizer cannot leave the community order")]
    OrganizerCannotLeave,

    #[error("{} participant(s) have not paid", unpaid.len())]
    IncompletePayment { unpaid: Vec<String> },

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for CommandError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::InvalidInput(_) => CommandError::new(ErrorCode::InvalidInput, message),
            EngineError::PaymentMismatch(_) => {
                CommandError::new(ErrorCode::PaymentMismatch, message)
            }
            EngineError::GatewayUnavailable(_) => {
                CommandError::new(ErrorCode::GatewayUnavailable, message)
            }
            EngineError::UnverifiedAddress => {
                CommandError::new(ErrorCode::UnverifiedAddress, message)
            }
            EngineError::IllegalCancellation(_) => {
                CommandError::new(ErrorCode::IllegalCancellation, message)
            }
            EngineError::AlreadyGathered => CommandError::new(ErrorCode::AlreadyGathered, message),
            EngineError::OrganizerCannotLeave => {
                CommandError::new(ErrorCode::OrganizerCannotLeave, message)
            }
            EngineError::IncompletePayment { unpaid } => {
                CommandError::with_unpaid(ErrorCode::IncompletePayment, message, unpaid)
            }
            EngineError::OrderNotFound(_) => CommandError::new(ErrorCode::OrderNotFound, message),
            EngineError::ParticipantNotFound(_) => {
                CommandError::new(ErrorCode::ParticipantNotFound, message)
            }
            EngineError::InvalidOperation(_) => {
                CommandError::new(ErrorCode::InvalidOperation, message)
            }
        }
    }
}
