//! Order Summary Model

use serde::{Deserialize, Serialize};

/// Money buckets for one order, all in minor currency units
///
/// `savings` is informational only (list-price deltas already reflected in
/// the unit prices); it is never subtracted from `total`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub discount: i64,
    pub tax: i64,
    pub total: i64,
    pub savings: i64,
}

impl OrderSummary {
    /// Summary arithmetic invariant:
    /// `total = subtotal + deliveryFee + tax - discount`, `savings >= 0`
    pub fn reconciles(&self) -> bool {
        self.total == self.subtotal + self.delivery_fee + self.tax - self.discount
            && self.savings >= 0
    }
}
