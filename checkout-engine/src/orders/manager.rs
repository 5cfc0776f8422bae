//! Single-order lifecycle manager
//!
//! Owns individual orders and drives their status state machine:
//! `pending → paid → processing → shipped → delivered`, with `cancelled`
//! reachable from any pre-shipment state. Transitions validate fully, then
//! apply; a rejected transition leaves the order untouched. Orders are
//! never physically deleted.
//!
//! Each order lives behind its own `RwLock`, so concurrent transitions on
//! one order serialize while different orders proceed independently.
//! Display reads clone a snapshot under the read lock.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::gateway::GatewayRegistry;
use crate::schedule;
use crate::summary::{DiscountPolicy, compute_summary};
use shared::models::{
    CartItem, DeliveryAddress, DeliveryOption, Order, OrderStatus, RecurringFrequency,
};

use super::recurrence;

/// Checkout submission input
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub delivery_date: NaiveDate,
    pub time_slot: String,
    pub address: DeliveryAddress,
    pub delivery_option: DeliveryOption,
    /// Gateway type, matched against the registry
    pub payment_method: String,
    /// Checkout-specific discount; `None` falls back to the configured
    /// checkout policy
    pub discount_policy: Option<DiscountPolicy>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub recurring_end_date: Option<NaiveDate>,
}

/// Outcome of the delivered transition
///
/// Carries the recurrence expansion as an explicit output so callers see
/// exactly what the transition produced.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub order: Order,
    pub next_occurrence: Option<Order>,
}

/// Single-order manager
pub struct OrderManager {
    orders: DashMap<String, Arc<RwLock<Order>>>,
    gateways: Arc<GatewayRegistry>,
    config: EngineConfig,
}

impl std::fmt::Debug for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderManager")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl OrderManager {
    pub fn new(gateways: Arc<GatewayRegistry>, config: EngineConfig) -> Self {
        Self {
            orders: DashMap::new(),
            gateways,
            config,
        }
    }

    /// Submit a checkout
    ///
    /// Validates the gateway, builds the delivery schedule, computes the
    /// summary and creates a `pending` order. `today` is the business date
    /// used for schedule validation.
    pub fn checkout(&self, input: CheckoutInput, today: NaiveDate) -> EngineResult<Order> {
        // 1. Gateway must be known and available
        let gateway = self.gateways.select(&input.payment_method)?;

        // 2. Recurring orders need a frequency
        if input.is_recurring && input.recurring_frequency.is_none() {
            return Err(EngineError::InvalidInput(
                "recurring orders require a frequency".to_string(),
            ));
        }

        // 3. Build and validate the delivery schedule
        let mut delivery_schedule = schedule::build_schedule(
            input.items.clone(),
            input.delivery_date,
            input.time_slot,
            input.address,
            input.delivery_option,
            today,
        )?;

        // 4. Compute the order summary (single group)
        let policy = input
            .discount_policy
            .unwrap_or_else(|| self.config.checkout_discount.clone());
        let order_summary = compute_summary(
            std::slice::from_ref(&input.items),
            &delivery_schedule.delivery_option,
            &policy,
            self.config.tax_rate_percent,
            gateway.processing_fee,
        )?;

        // 5. Materialize the order
        let id = uuid::Uuid::new_v4().to_string();
        schedule::attach(&mut delivery_schedule, &id)?;
        let order = Order {
            id: id.clone(),
            user_id: input.user_id,
            items: input.items,
            delivery_schedules: vec![delivery_schedule],
            payment_method: gateway.gateway_type,
            order_summary,
            status: OrderStatus::Pending,
            is_recurring: input.is_recurring,
            recurring_frequency: input.recurring_frequency,
            recurring_end_date: input.recurring_end_date,
            created_at: Utc::now(),
        };
        tracing::info!(
            order_id = %id,
            user_id = %order.user_id,
            total = order.order_summary.total,
            "order created"
        );
        self.orders
            .insert(id, Arc::new(RwLock::new(order.clone())));
        Ok(order)
    }

    /// Register an externally materialized order (community consolidation,
    /// recurrence expansion)
    pub fn register(&self, order: Order) {
        self.orders
            .insert(order.id.clone(), Arc::new(RwLock::new(order)));
    }

    /// Display snapshot, cloned under the read lock
    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.orders
            .get(order_id)
            .map(|entry| entry.value().read().clone())
    }

    fn entry(&self, order_id: &str) -> EngineResult<Arc<RwLock<Order>>> {
        self.orders
            .get(order_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))
    }

    /// External payment confirmation: `pending → paid`
    ///
    /// The confirmation must name a known gateway type that matches the
    /// method the order was checked out with.
    pub fn confirm_payment(&self, order_id: &str, payment_method: &str) -> EngineResult<Order> {
        let entry = self.entry(order_id)?;
        let mut order = entry.write();
        if order.status != OrderStatus::Pending {
            return Err(EngineError::InvalidOperation(format!(
                "cannot confirm payment in {:?} status",
                order.status
            )));
        }
        if self.gateways.lookup(payment_method).is_none() || order.payment_method != payment_method
        {
            return Err(EngineError::PaymentMismatch(payment_method.to_string()));
        }
        order.status = OrderStatus::Paid;
        tracing::info!(order_id, status = "paid", "payment confirmed");
        Ok(order.clone())
    }

    /// Fulfilment started: `paid → processing`
    pub fn begin_processing(&self, order_id: &str) -> EngineResult<Order> {
        let entry = self.entry(order_id)?;
        let mut order = entry.write();
        if order.status != OrderStatus::Paid {
            return Err(EngineError::InvalidOperation(format!(
                "cannot begin processing in {:?} status",
                order.status
            )));
        }
        order.status = OrderStatus::Processing;
        tracing::info!(order_id, status = "processing", "fulfilment started");
        Ok(order.clone())
    }

    /// Handed to delivery: `processing → shipped`
    ///
    /// Every schedule's address must be verified by the external
    /// verification service.
    pub fn mark_shipped(&self, order_id: &str) -> EngineResult<Order> {
        let entry = self.entry(order_id)?;
        let mut order = entry.write();
        if order.status != OrderStatus::Processing {
            return Err(EngineError::InvalidOperation(format!(
                "cannot ship in {:?} status",
                order.status
            )));
        }
        if !order
            .delivery_schedules
            .iter()
            .all(|schedule| schedule.address.is_verified)
        {
            return Err(EngineError::UnverifiedAddress);
        }
        order.status = OrderStatus::Shipped;
        tracing::info!(order_id, status = "shipped", "order shipped");
        Ok(order.clone())
    }

    /// Delivery confirmed: `shipped → delivered`
    ///
    /// Returns the recurrence expansion alongside the delivered order. The
    /// next occurrence, if any, is registered with the manager as a new
    /// `pending` order.
    pub fn mark_delivered(&self, order_id: &str) -> EngineResult<DeliveryOutcome> {
        let delivered = {
            let entry = self.entry(order_id)?;
            let mut order = entry.write();
            if order.status != OrderStatus::Shipped {
                return Err(EngineError::InvalidOperation(format!(
                    "cannot deliver in {:?} status",
                    order.status
                )));
            }
            order.status = OrderStatus::Delivered;
            tracing::info!(order_id, status = "delivered", "delivery confirmed");
            order.clone()
        };

        let next_occurrence = recurrence::next_occurrence(&delivered, Utc::now());
        if let Some(next) = &next_occurrence {
            tracing::info!(
                order_id = %next.id,
                parent_order_id = %delivered.id,
                "recurring order generated"
            );
            self.register(next.clone());
        }

        Ok(DeliveryOutcome {
            order: delivered,
            next_occurrence,
        })
    }

    /// Cancel an order: legal from `pending`, `paid` or `processing` only
    pub fn cancel(&self, order_id: &str) -> EngineResult<Order> {
        let entry = self.entry(order_id)?;
        let mut order = entry.write();
        if !order.status.can_cancel() {
            return Err(EngineError::IllegalCancellation(
                format!("{:?}", order.status).to_lowercase(),
            ));
        }
        order.status = OrderStatus::Cancelled;
        tracing::info!(order_id, status = "cancelled", "order cancelled");
        Ok(order.clone())
    }
}
