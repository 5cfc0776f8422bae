//! Money arithmetic in minor currency units
//!
//! All monetary amounts are integer minor currency units (`i64`).
//! Percentage rates (tax, discounts, gateway fees) use `Decimal` and are
//! rounded half-up to whole minor units exactly once per bucket, never per
//! participant.

use rust_decimal::prelude::*;

use crate::error::{EngineError, EngineResult};
use shared::models::CartItem;

/// Maximum allowed unit price per item (minor units)
const MAX_UNIT_PRICE: i64 = 100_000_000;
/// Maximum allowed quantity per line item
const MAX_QUANTITY: u32 = 9999;

/// Round a decimal amount half-up to whole minor units
pub fn round_minor(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Percentage (7.5 means 7.5%) to rate (0.075)
pub fn percent_to_rate(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Apply a rate to an integer base, rounding half-up to minor units
pub fn apply_rate(base: i64, rate: Decimal) -> i64 {
    round_minor(Decimal::from(base) * rate)
}

/// Validate a cart item at the engine boundary
pub fn validate_cart_item(item: &CartItem) -> EngineResult<()> {
    if item.quantity == 0 {
        return Err(EngineError::InvalidInput(format!(
            "quantity must be positive for item {}",
            item.id
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(EngineError::InvalidInput(format!(
            "quantity exceeds maximum allowed ({}) for item {}",
            MAX_QUANTITY, item.id
        )));
    }
    if item.unit_price < 0 {
        return Err(EngineError::InvalidInput(format!(
            "unit price must be non-negative for item {}, got {}",
            item.id, item.unit_price
        )));
    }
    if item.unit_price > MAX_UNIT_PRICE {
        return Err(EngineError::InvalidInput(format!(
            "unit price exceeds maximum allowed ({}) for item {}",
            MAX_UNIT_PRICE, item.id
        )));
    }
    if let Some(list) = item.list_price
        && list < 0
    {
        return Err(EngineError::InvalidInput(format!(
            "list price must be non-negative for item {}, got {}",
            item.id, list
        )));
    }
    Ok(())
}

/// Validate a percentage rate (tax rate, processing fee)
pub fn validate_rate(percent: Decimal, field: &str) -> EngineResult<()> {
    if percent.is_sign_negative() && !percent.is_zero() {
        return Err(EngineError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            field, percent
        )));
    }
    Ok(())
}
