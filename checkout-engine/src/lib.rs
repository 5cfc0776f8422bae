//! Order & Community-Order Consolidation Engine
//!
//! Aggregates participants' carts into one deliverable order, tracks each
//! participant's payment status independently, computes a single consistent
//! order summary across heterogeneous line items, and expands recurring
//! orders.
//!
//! - **summary**: pure order summary calculator (subtotal, fees, discount,
//!   tax, total, savings)
//! - **schedule**: delivery schedule construction and validation
//! - **gateway**: payment gateway registry (reference data lookup)
//! - **orders**: single-order lifecycle manager and recurrence expansion
//! - **community**: community-order consolidation manager
//!
//! # Data Flow
//!
//! ```text
//! Catalog snapshots → schedule::build_schedule → summary::compute_summary
//!         ↓                                             ↓
//!   OrderManager::checkout ──────────────── CommunityOrderManager::open
//!         ↓                                             ↓
//!   status transitions (external events)      finalize → consolidated Order
//! ```

pub mod community;
pub mod config;
pub mod error;
pub mod gateway;
pub mod orders;
pub mod schedule;
pub mod summary;
pub mod utils;

// Re-exports
pub use community::CommunityOrderManager;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use gateway::GatewayRegistry;
pub use orders::{CheckoutInput, DeliveryOutcome, OrderManager};
pub use summary::{DiscountPolicy, DiscountTier, compute_summary};
