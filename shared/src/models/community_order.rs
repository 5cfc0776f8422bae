//! Community Order Model
//!
//! A single delivery jointly built and paid for by multiple participants.
//! `items` and `payment_status` are keyed by participant user id and must
//! stay in exact bijection with `participant_ids` - no participant without
//! an items entry and a payment entry, no orphaned entries after removal.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CartItem, DeliverySchedule, OrderSummary};

/// Community order status
///
/// `gathering → processing → shipped → delivered`, with `cancelled`
/// reachable from `gathering` or `processing` only. Past finalization the
/// community order mirrors its consolidated main order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommunityStatus {
    #[default]
    Gathering,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl CommunityStatus {
    pub fn can_cancel(self) -> bool {
        matches!(self, Self::Gathering | Self::Processing)
    }
}

/// Per-participant payment status
///
/// A failed gateway payment simply never leaves `pending`; retries are
/// caller-driven.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Community order record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityOrder {
    pub id: String,
    /// Consolidated order this community order materializes into at finalize
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_order_id: Option<String>,
    /// Organizer user id
    pub user_id: String,
    pub participant_ids: BTreeSet<String>,
    /// Per-participant item bundles, keyed by participant user id
    pub items: BTreeMap<String, Vec<CartItem>>,
    /// Single shared schedule for the whole group
    pub delivery_schedule: DeliverySchedule,
    pub payment_status: BTreeMap<String, PaymentStatus>,
    pub order_summary: OrderSummary,
    pub status: CommunityStatus,
    pub created_at: DateTime<Utc>,
}

impl CommunityOrder {
    /// Roster bijection invariant:
    /// `participant_ids == items.keys() == payment_status.keys()`
    pub fn roster_consistent(&self) -> bool {
        self.participant_ids.iter().eq(self.items.keys())
            && self.participant_ids.iter().eq(self.payment_status.keys())
    }

    /// Participant ids still in `pending` payment status
    pub fn unpaid_participants(&self) -> Vec<String> {
        self.payment_status
            .iter()
            .filter(|(_, status)| **status == PaymentStatus::Pending)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
