//! Order summary calculation
//!
//! - **money**: minor-currency-unit arithmetic and boundary validation
//! - **policy**: enumerated discount policy configuration
//! - **calculator**: the pure `compute_summary` function

pub mod calculator;
pub mod money;
pub mod policy;

// Re-exports
pub use calculator::compute_summary;
pub use policy::{DiscountPolicy, DiscountTier};
