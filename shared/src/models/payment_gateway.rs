//! Payment Gateway Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment gateway reference data
///
/// Looked up by `gateway_type` at checkout time. The engine records which
/// gateway was selected and folds its advertised `processing_fee` into the
/// order's fee basis; it never executes payment transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentGateway {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub gateway_type: String,
    pub icon: String,
    pub description: String,
    /// Processing fee as a percentage (2.9 means 2.9%)
    pub processing_fee: Decimal,
    pub is_available: bool,
}
