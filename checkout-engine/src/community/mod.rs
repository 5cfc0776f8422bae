//! Community-order consolidation
//!
//! - **manager**: roster, per-participant bundles and payments, aggregate
//!   summary, finalization into a consolidated order

pub mod manager;

// Re-exports
pub use manager::CommunityOrderManager;
