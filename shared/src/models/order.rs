//! Order Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CartItem, DeliverySchedule, OrderSummary};

/// Order status state machine
///
/// `pending → paid → processing → shipped → delivered`, with `cancelled`
/// reachable from any pre-shipment state. `delivered` and `cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Cancellation is legal only before the order ships
    pub fn can_cancel(self) -> bool {
        matches!(self, Self::Pending | Self::Paid | Self::Processing)
    }
}

/// Recurrence cadence for recurring orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

/// Individual order record
///
/// Owned exclusively by `user_id`, mutated only through the order manager,
/// never physically deleted - cancellation is a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    /// Ordered - split-schedule orders carry more than one entry
    pub delivery_schedules: Vec<DeliverySchedule>,
    /// Gateway type selected at checkout
    pub payment_method: String,
    pub order_summary: OrderSummary,
    pub status: OrderStatus,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<RecurringFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
