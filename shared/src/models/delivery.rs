//! Delivery Models
//!
//! Addresses, shipping tiers and delivery schedules. Address verification
//! is performed by an external geocoding service; the engine only reads
//! the `is_verified` flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CartItem;

/// Geocoded point attached to a verified address
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Delivery address - partial addresses are permitted before checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Set by the external address-verification service
    #[serde(default)]
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Named shipping tier - immutable reference data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub estimated_days: u32,
    /// Fee in minor currency units
    pub price: i64,
}

/// One delivery against a shared date, time slot and address
///
/// A schedule belongs to exactly one order (or one community order);
/// `order_id` is set once when the schedule is attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub items: Vec<CartItem>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub address: DeliveryAddress,
    pub delivery_option: DeliveryOption,
}
