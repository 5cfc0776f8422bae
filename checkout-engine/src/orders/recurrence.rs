//! Recurring order expansion
//!
//! Recurrence is an explicit output of the delivered transition: the
//! manager returns the next occurrence (if any) instead of mutating state
//! behind the caller's back, which keeps the state machine pure and
//! testable.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};

use shared::models::{Order, OrderStatus, RecurringFrequency};

/// Advance a delivery date by one recurrence step
///
/// Monthly keeps the day-of-month, clamped to the end of the target month
/// (Jan 31 → Feb 28, or Feb 29 in a leap year).
pub fn advance_date(date: NaiveDate, frequency: RecurringFrequency) -> NaiveDate {
    match frequency {
        RecurringFrequency::Weekly => date + Days::new(7),
        RecurringFrequency::Biweekly => date + Days::new(14),
        RecurringFrequency::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
    }
}

/// Materialize the next occurrence of a delivered recurring order
///
/// Returns `None` when the order is not recurring, when the end date is
/// already past at generation time, or when any advanced schedule date
/// would exceed `recurring_end_date`.
pub fn next_occurrence(order: &Order, created_at: DateTime<Utc>) -> Option<Order> {
    if !order.is_recurring || order.delivery_schedules.is_empty() {
        return None;
    }
    let frequency = order.recurring_frequency?;

    if let Some(end) = order.recurring_end_date
        && end < created_at.date_naive()
    {
        return None;
    }

    let mut schedules = order.delivery_schedules.clone();
    for schedule in &mut schedules {
        schedule.date = advance_date(schedule.date, frequency);
        schedule.order_id = None;
    }
    if let Some(end) = order.recurring_end_date
        && schedules.iter().any(|schedule| schedule.date > end)
    {
        return None;
    }

    let id = uuid::Uuid::new_v4().to_string();
    for schedule in &mut schedules {
        schedule.order_id = Some(id.clone());
    }

    Some(Order {
        id,
        user_id: order.user_id.clone(),
        items: order.items.clone(),
        delivery_schedules: schedules,
        payment_method: order.payment_method.clone(),
        order_summary: order.order_summary,
        status: OrderStatus::Pending,
        is_recurring: true,
        recurring_frequency: Some(frequency),
        recurring_end_date: order.recurring_end_date,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        CartItem, DeliveryAddress, DeliveryOption, DeliverySchedule, OrderSummary,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring_order(
        delivery_date: NaiveDate,
        frequency: RecurringFrequency,
        end_date: Option<NaiveDate>,
    ) -> Order {
        let item = CartItem {
            id: "meal-1".to_string(),
            name: "Bento Box".to_string(),
            unit_price: 1000,
            quantity: 1,
            list_price: None,
            image: "bento.jpg".to_string(),
            vendor_id: "vendor-1".to_string(),
            vendor_name: "Test Kitchen".to_string(),
        };
        Order {
            id: "order-1".to_string(),
            user_id: "alice".to_string(),
            items: vec![item.clone()],
            delivery_schedules: vec![DeliverySchedule {
                order_id: Some("order-1".to_string()),
                items: vec![item],
                date: delivery_date,
                time_slot: "12:00-14:00".to_string(),
                address: DeliveryAddress::default(),
                delivery_option: DeliveryOption {
                    id: "std".to_string(),
                    name: "Standard".to_string(),
                    description: String::new(),
                    estimated_days: 2,
                    price: 500,
                },
            }],
            payment_method: "card".to_string(),
            order_summary: OrderSummary::default(),
            status: OrderStatus::Delivered,
            is_recurring: true,
            recurring_frequency: Some(frequency),
            recurring_end_date: end_date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_advance_weekly_and_biweekly() {
        assert_eq!(
            advance_date(date(2026, 1, 5), RecurringFrequency::Weekly),
            date(2026, 1, 12)
        );
        assert_eq!(
            advance_date(date(2026, 1, 5), RecurringFrequency::Biweekly),
            date(2026, 1, 19)
        );
    }

    #[test]
    fn test_advance_monthly_clamps_to_end_of_month() {
        // Jan 31 → Feb 28 in a non-leap year, not Mar 3
        assert_eq!(
            advance_date(date(2026, 1, 31), RecurringFrequency::Monthly),
            date(2026, 2, 28)
        );
        // Feb 29 in a leap year
        assert_eq!(
            advance_date(date(2024, 1, 31), RecurringFrequency::Monthly),
            date(2024, 2, 29)
        );
        // Plain day carries over unchanged
        assert_eq!(
            advance_date(date(2026, 3, 15), RecurringFrequency::Monthly),
            date(2026, 4, 15)
        );
    }

    #[test]
    fn test_next_occurrence_resets_status_and_advances_date() {
        let order = recurring_order(date(2026, 9, 10), RecurringFrequency::Weekly, None);
        let next = next_occurrence(&order, Utc::now()).unwrap();

        assert_ne!(next.id, order.id);
        assert_eq!(next.status, OrderStatus::Pending);
        assert_eq!(next.delivery_schedules[0].date, date(2026, 9, 17));
        assert_eq!(next.delivery_schedules[0].order_id, Some(next.id.clone()));
        assert_eq!(next.items, order.items);
    }

    #[test]
    fn test_no_occurrence_for_non_recurring() {
        let mut order = recurring_order(date(2026, 9, 10), RecurringFrequency::Weekly, None);
        order.is_recurring = false;
        assert!(next_occurrence(&order, Utc::now()).is_none());
    }

    #[test]
    fn test_stops_when_advanced_date_exceeds_end() {
        let order = recurring_order(
            date(2026, 9, 10),
            RecurringFrequency::Weekly,
            Some(date(2026, 9, 15)),
        );
        assert!(next_occurrence(&order, Utc::now()).is_none());
    }

    #[test]
    fn test_stops_when_end_date_already_past() {
        let order = recurring_order(
            date(2099, 1, 1),
            RecurringFrequency::Weekly,
            Some(date(2020, 1, 1)),
        );
        assert!(next_occurrence(&order, Utc::now()).is_none());
    }

    #[test]
    fn test_continues_up_to_end_date() {
        let order = recurring_order(
            date(2026, 9, 10),
            RecurringFrequency::Weekly,
            Some(date(2026, 9, 17)),
        );
        let next = next_occurrence(&order, Utc::now()).unwrap();
        assert_eq!(next.delivery_schedules[0].date, date(2026, 9, 17));
    }
}
