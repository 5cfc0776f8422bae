//! Shared types for the meal storefront checkout engine
//!
//! Data model shared between the checkout engine and the presentation
//! layer: cart snapshots, delivery scheduling, order and community-order
//! records, payment gateway reference data, and the client-facing error
//! payloads. The serialized field names are the contract the presentation
//! layer consumes; see the `models` module docs.

pub mod error;
pub mod models;

// Re-exports
pub use error::{CommandError, ErrorCode};
pub use serde::{Deserialize, Serialize};
