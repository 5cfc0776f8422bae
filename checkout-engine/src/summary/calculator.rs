//! Order summary calculator
//!
//! Pure function from line item groups + delivery option + discount policy
//! + rates to an `OrderSummary`. Community orders pass one group per
//! participant; single orders pass one group. The calculation is
//! shape-independent: only the multiset of line items matters. Same inputs
//! always produce the same summary.
//!
//! # Calculation Steps
//!
//! 1. Validate rates, policy and every line item up front
//! 2. Subtotal and savings over all groups
//! 3. Delivery fee once per shared schedule + gateway fee folded in
//! 4. Discount on the subtotal, capped at `subtotal + deliveryFee`
//! 5. Tax half-up on the combined base, applied once
//! 6. `total = subtotal + deliveryFee + tax - discount`

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use shared::models::{CartItem, DeliveryOption, OrderSummary};

use super::money::{apply_rate, percent_to_rate, validate_cart_item, validate_rate};
use super::policy::DiscountPolicy;

/// Compute the order summary for one or more line item groups
///
/// The delivery fee is applied once regardless of how many groups
/// (participants) share the schedule. The gateway processing fee is folded
/// into the `delivery_fee` bucket, computed on the subtotal.
pub fn compute_summary<G: AsRef<[CartItem]>>(
    groups: &[G],
    delivery_option: &DeliveryOption,
    policy: &DiscountPolicy,
    tax_rate_percent: Decimal,
    gateway_fee_percent: Decimal,
) -> EngineResult<OrderSummary> {
    // 1. Validate everything before computing anything
    validate_rate(tax_rate_percent, "taxRate")?;
    validate_rate(gateway_fee_percent, "processingFee")?;
    policy.validate()?;
    if delivery_option.price < 0 {
        return Err(EngineError::InvalidInput(format!(
            "delivery option price must be non-negative, got {}",
            delivery_option.price
        )));
    }
    for group in groups {
        for item in group.as_ref() {
            validate_cart_item(item)?;
        }
    }

    // 2. Subtotal and savings across all groups
    let mut subtotal: i64 = 0;
    let mut savings: i64 = 0;
    for group in groups {
        for item in group.as_ref() {
            subtotal += item.line_total();
            savings += item.line_savings();
        }
    }

    // 3. Delivery fee once per shared schedule; gateway fee folds into the
    //    same bucket so it reaches the tax base exactly once
    let delivery_fee =
        delivery_option.price + apply_rate(subtotal, percent_to_rate(gateway_fee_percent));

    // 4. Discount, capped so it never exceeds subtotal + delivery fee
    let discount = policy.amount_for(subtotal).min(subtotal + delivery_fee);

    // 5. Tax half-up on the combined base, applied once (never per group)
    let tax = apply_rate(
        subtotal + delivery_fee - discount,
        percent_to_rate(tax_rate_percent),
    );

    let total = subtotal + delivery_fee + tax - discount;

    Ok(OrderSummary {
        subtotal,
        delivery_fee,
        discount,
        tax,
        total,
        savings,
    })
}
