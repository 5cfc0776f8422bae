//! Data models
//!
//! Shared between the checkout engine and the presentation layer.
//! Persisted types serialize with `camelCase` field names; status and
//! frequency enums serialize as lowercase strings. Any storage layer must
//! preserve this shape.

pub mod cart_item;
pub mod community_order;
pub mod delivery;
pub mod order;
pub mod payment_gateway;
pub mod summary;

// Re-exports
pub use cart_item::*;
pub use community_order::*;
pub use delivery::*;
pub use order::*;
pub use payment_gateway::*;
pub use summary::*;
