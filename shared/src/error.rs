//! Client-facing error payloads
//!
//! The engine's error enums convert into `CommandError` so the
//! presentation layer can render a stable machine-readable code plus
//! structured detail (e.g. the unpaid participant list on a failed
//! finalize). Message localization is the frontend's responsibility.

use serde::{Deserialize, Serialize};

/// Error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    PaymentMismatch,
    GatewayUnavailable,
    UnverifiedAddress,
    IllegalCancellation,
    AlreadyGathered,
    OrganizerCannotLeave,
    IncompletePayment,
    OrderNotFound,
    ParticipantNotFound,
    InvalidOperation,
}

/// Structured error returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
    /// Unpaid participant ids (`IncompletePayment` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unpaid: Option<Vec<String>>,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            unpaid: None,
        }
    }

    pub fn with_unpaid(code: ErrorCode, message: impl Into<String>, unpaid: Vec<String>) -> Self {
        Self {
            code,
            message: message.into(),
            unpaid: Some(unpaid),
        }
    }
}
