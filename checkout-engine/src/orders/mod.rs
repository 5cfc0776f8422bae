//! Single-order lifecycle
//!
//! - **manager**: order ownership, checkout and status transitions
//! - **recurrence**: recurring order expansion as an explicit transition
//!   output

pub mod manager;
pub mod recurrence;

// Re-exports
pub use manager::{CheckoutInput, DeliveryOutcome, OrderManager};
