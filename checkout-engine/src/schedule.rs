//! Delivery schedule construction
//!
//! Builds `DeliverySchedule` entries from catalog item snapshots and
//! validates them before they attach to an order. The engine receives the
//! business date from the caller so scheduling stays deterministic in
//! tests.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::summary::money::validate_cart_item;
use shared::models::{CartItem, DeliveryAddress, DeliveryOption, DeliverySchedule};

/// Build a delivery schedule
///
/// Validates that `items` is non-empty, every item passes boundary checks,
/// the date is not before `today`, and the delivery option fee is
/// non-negative.
pub fn build_schedule(
    items: Vec<CartItem>,
    date: NaiveDate,
    time_slot: impl Into<String>,
    address: DeliveryAddress,
    delivery_option: DeliveryOption,
    today: NaiveDate,
) -> EngineResult<DeliverySchedule> {
    if items.is_empty() {
        return Err(EngineError::InvalidInput(
            "delivery schedule requires at least one item".to_string(),
        ));
    }
    for item in &items {
        validate_cart_item(item)?;
    }
    if date < today {
        return Err(EngineError::InvalidInput(format!(
            "delivery date {} is in the past (today is {})",
            date, today
        )));
    }
    if delivery_option.price < 0 {
        return Err(EngineError::InvalidInput(format!(
            "delivery option price must be non-negative, got {}",
            delivery_option.price
        )));
    }

    Ok(DeliverySchedule {
        order_id: None,
        items,
        date,
        time_slot: time_slot.into(),
        address,
        delivery_option,
    })
}

/// Attach a schedule to its owning order
///
/// A schedule belongs to exactly one order; `order_id` is set once.
/// Re-attaching to the same order is a no-op.
pub fn attach(schedule: &mut DeliverySchedule, order_id: &str) -> EngineResult<()> {
    if let Some(existing) = &schedule.order_id {
        if existing != order_id {
            return Err(EngineError::InvalidOperation(format!(
                "schedule already attached to order {}",
                existing
            )));
        }
        return Ok(());
    }
    schedule.order_id = Some(order_id.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CartItem {
        CartItem {
            id: "meal-1".to_string(),
            name: "Bento Box".to_string(),
            unit_price: 1000,
            quantity: 1,
            list_price: None,
            image: "bento.jpg".to_string(),
            vendor_id: "vendor-1".to_string(),
            vendor_name: "Test Kitchen".to_string(),
        }
    }

    fn option() -> DeliveryOption {
        DeliveryOption {
            id: "std".to_string(),
            name: "Standard".to_string(),
            description: String::new(),
            estimated_days: 2,
            price: 500,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_schedule() {
        let schedule = build_schedule(
            vec![item()],
            date(2026, 9, 15),
            "12:00-14:00",
            DeliveryAddress::default(),
            option(),
            date(2026, 9, 1),
        )
        .unwrap();
        assert_eq!(schedule.order_id, None);
        assert_eq!(schedule.items.len(), 1);
    }

    #[test]
    fn test_rejects_empty_items() {
        let result = build_schedule(
            vec![],
            date(2026, 9, 15),
            "12:00-14:00",
            DeliveryAddress::default(),
            option(),
            date(2026, 9, 1),
        );
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_past_date() {
        let result = build_schedule(
            vec![item()],
            date(2026, 8, 31),
            "12:00-14:00",
            DeliveryAddress::default(),
            option(),
            date(2026, 9, 1),
        );
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_same_day_is_allowed() {
        let result = build_schedule(
            vec![item()],
            date(2026, 9, 1),
            "18:00-20:00",
            DeliveryAddress::default(),
            option(),
            date(2026, 9, 1),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_attach_is_set_once() {
        let mut schedule = build_schedule(
            vec![item()],
            date(2026, 9, 15),
            "12:00-14:00",
            DeliveryAddress::default(),
            option(),
            date(2026, 9, 1),
        )
        .unwrap();

        attach(&mut schedule, "order-1").unwrap();
        assert_eq!(schedule.order_id.as_deref(), Some("order-1"));

        // Idempotent for the same order
        assert!(attach(&mut schedule, "order-1").is_ok());

        // Rejected for a different order
        assert!(matches!(
            attach(&mut schedule, "order-2"),
            Err(EngineError::InvalidOperation(_))
        ));
    }
}
