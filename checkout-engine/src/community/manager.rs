//! Community-order consolidation manager
//!
//! Coordinates a shared delivery built by multiple participants: the
//! roster, per-participant item bundles, per-participant payment status
//! and the aggregate summary. Past finalization the community order is a
//! view over its consolidated main order and mirrors its transitions.
//!
//! Each community order lives behind its own `RwLock`; every operation
//! that reads-then-writes the roster, bundles or summary holds the write
//! lock for its full duration, so the roster bijection and the summary
//! arithmetic are never observed broken mid-update. The aggregate summary
//! is always recomputed from the full items mapping, never patched
//! incrementally.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::gateway::GatewayRegistry;
use crate::orders::OrderManager;
use crate::schedule;
use crate::summary::compute_summary;
use crate::summary::money::validate_cart_item;
use shared::models::{
    CartItem, CommunityOrder, CommunityStatus, DeliveryAddress, DeliveryOption, Order, OrderStatus,
    PaymentStatus,
};

/// Community-order manager
pub struct CommunityOrderManager {
    orders: DashMap<String, Arc<RwLock<CommunityOrder>>>,
    order_manager: Arc<OrderManager>,
    gateways: Arc<GatewayRegistry>,
    config: EngineConfig,
}

impl std::fmt::Debug for CommunityOrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunityOrderManager")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl CommunityOrderManager {
    pub fn new(
        order_manager: Arc<OrderManager>,
        gateways: Arc<GatewayRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            orders: DashMap::new(),
            order_manager,
            gateways,
            config,
        }
    }

    /// Open a community order
    ///
    /// The organizer is the first participant; their initial items seed the
    /// shared schedule. `today` is the business date for schedule
    /// validation.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &self,
        organizer_id: impl Into<String>,
        items: Vec<CartItem>,
        delivery_date: NaiveDate,
        time_slot: impl Into<String>,
        address: DeliveryAddress,
        delivery_option: DeliveryOption,
        today: NaiveDate,
    ) -> EngineResult<CommunityOrder> {
        let organizer_id = organizer_id.into();
        let mut delivery_schedule = schedule::build_schedule(
            items.clone(),
            delivery_date,
            time_slot,
            address,
            delivery_option,
            today,
        )?;

        let id = uuid::Uuid::new_v4().to_string();
        schedule::attach(&mut delivery_schedule, &id)?;

        let mut order = CommunityOrder {
            id: id.clone(),
            main_order_id: None,
            user_id: organizer_id.clone(),
            participant_ids: BTreeSet::from([organizer_id.clone()]),
            items: BTreeMap::from([(organizer_id.clone(), items)]),
            delivery_schedule,
            payment_status: BTreeMap::from([(organizer_id, PaymentStatus::Pending)]),
            order_summary: Default::default(),
            status: CommunityStatus::Gathering,
            created_at: Utc::now(),
        };
        self.recompute_summary(&mut order)?;
        debug_assert!(order.roster_consistent());

        tracing::info!(community_id = %id, organizer = %order.user_id, "community order opened");
        self.orders
            .insert(id, Arc::new(RwLock::new(order.clone())));
        Ok(order)
    }

    /// Display snapshot, cloned under the read lock
    pub fn get_order(&self, community_id: &str) -> Option<CommunityOrder> {
        self.orders
            .get(community_id)
            .map(|entry| entry.value().read().clone())
    }

    fn entry(&self, community_id: &str) -> EngineResult<Arc<RwLock<CommunityOrder>>> {
        self.orders
            .get(community_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::OrderNotFound(community_id.to_string()))
    }

    /// Organizer adds a participant while gathering
    ///
    /// Inserts an empty bundle and a pending payment entry, keeping the
    /// roster bijection intact.
    pub fn add_participant(
        &self,
        community_id: &str,
        user_id: impl Into<String>,
    ) -> EngineResult<CommunityOrder> {
        let user_id = user_id.into();
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if order.status != CommunityStatus::Gathering {
            return Err(EngineError::AlreadyGathered);
        }
        if order.participant_ids.contains(&user_id) {
            return Err(EngineError::InvalidOperation(format!(
                "participant already present: {}",
                user_id
            )));
        }

        order.participant_ids.insert(user_id.clone());
        order.items.insert(user_id.clone(), Vec::new());
        order
            .payment_status
            .insert(user_id.clone(), PaymentStatus::Pending);
        debug_assert!(order.roster_consistent());

        tracing::info!(community_id, participant = %user_id, "participant added");
        Ok(order.clone())
    }

    /// Remove a participant while gathering
    ///
    /// The organizer cannot leave. Items and payment entries are removed
    /// atomically and the aggregate summary recomputed.
    pub fn remove_participant(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> EngineResult<CommunityOrder> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if order.status != CommunityStatus::Gathering {
            return Err(EngineError::AlreadyGathered);
        }
        if user_id == order.user_id {
            return Err(EngineError::OrganizerCannotLeave);
        }
        if !order.participant_ids.contains(user_id) {
            return Err(EngineError::ParticipantNotFound(user_id.to_string()));
        }

        order.participant_ids.remove(user_id);
        order.items.remove(user_id);
        order.payment_status.remove(user_id);
        self.recompute_summary(&mut order)?;
        debug_assert!(order.roster_consistent());

        tracing::info!(community_id, participant = %user_id, "participant removed");
        Ok(order.clone())
    }

    /// Replace a participant's own bundle while gathering
    ///
    /// Last write wins per participant; the aggregate summary is
    /// recomputed from the current full items mapping.
    pub fn update_participant_items(
        &self,
        community_id: &str,
        user_id: &str,
        items: Vec<CartItem>,
    ) -> EngineResult<CommunityOrder> {
        // Validate the bundle before taking the write lock
        for item in &items {
            validate_cart_item(item)?;
        }

        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if order.status != CommunityStatus::Gathering {
            return Err(EngineError::AlreadyGathered);
        }
        if !order.participant_ids.contains(user_id) {
            return Err(EngineError::ParticipantNotFound(user_id.to_string()));
        }

        order.items.insert(user_id.to_string(), items);
        self.recompute_summary(&mut order)?;
        debug_assert!(order.roster_consistent());
        Ok(order.clone())
    }

    /// Record a participant's payment
    ///
    /// Sets the participant's status to `paid`; idempotent, and does not by
    /// itself advance the community order.
    pub fn record_payment(&self, community_id: &str, user_id: &str) -> EngineResult<CommunityOrder> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if !order.participant_ids.contains(user_id) {
            return Err(EngineError::ParticipantNotFound(user_id.to_string()));
        }
        order
            .payment_status
            .insert(user_id.to_string(), PaymentStatus::Paid);
        tracing::info!(community_id, participant = %user_id, "participant payment recorded");
        Ok(order.clone())
    }

    /// Consolidate: every participant paid → materialize the main order
    ///
    /// Fails fast with `IncompletePayment` (listing unpaid participant
    /// ids) rather than waiting. On success the consolidated order carries
    /// the flattened union of all bundles, the community order's aggregate
    /// summary, and starts in `processing` (payments are complete by
    /// construction).
    pub fn finalize(
        &self,
        community_id: &str,
        payment_method: &str,
    ) -> EngineResult<(CommunityOrder, Order)> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();

        // 1. Must still be gathering with a non-empty roster
        if order.status != CommunityStatus::Gathering {
            return Err(EngineError::AlreadyGathered);
        }
        if order.participant_ids.is_empty() {
            return Err(EngineError::InvalidOperation(
                "community order has no participants".to_string(),
            ));
        }

        // 2. Fail fast if anyone is still pending
        let unpaid = order.unpaid_participants();
        if !unpaid.is_empty() {
            return Err(EngineError::IncompletePayment { unpaid });
        }

        // 3. The consolidated order needs a usable gateway
        let gateway = self.gateways.select(payment_method)?;

        // 4. Flatten all bundles into one order
        let items: Vec<CartItem> = order.items.values().flatten().cloned().collect();
        if items.is_empty() {
            return Err(EngineError::InvalidOperation(
                "community order has no items".to_string(),
            ));
        }
        let mut delivery_schedule = order.delivery_schedule.clone();
        delivery_schedule.items = items.clone();
        delivery_schedule.order_id = None;

        let main_order_id = uuid::Uuid::new_v4().to_string();
        schedule::attach(&mut delivery_schedule, &main_order_id)?;
        let main_order = Order {
            id: main_order_id.clone(),
            user_id: order.user_id.clone(),
            items,
            delivery_schedules: vec![delivery_schedule],
            payment_method: gateway.gateway_type,
            order_summary: order.order_summary,
            status: OrderStatus::Processing,
            is_recurring: false,
            recurring_frequency: None,
            recurring_end_date: None,
            created_at: Utc::now(),
        };
        self.order_manager.register(main_order.clone());

        // 5. Transition the community order
        order.main_order_id = Some(main_order_id.clone());
        order.status = CommunityStatus::Processing;
        tracing::info!(
            community_id,
            main_order_id = %main_order_id,
            participants = order.participant_ids.len(),
            total = order.order_summary.total,
            "community order finalized"
        );
        Ok((order.clone(), main_order))
    }

    /// Mirror the main order's shipped transition
    pub fn mark_shipped(&self, community_id: &str) -> EngineResult<CommunityOrder> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if order.status != CommunityStatus::Processing {
            return Err(EngineError::InvalidOperation(format!(
                "cannot ship community order in {:?} status",
                order.status
            )));
        }
        let main_order_id = order
            .main_order_id
            .clone()
            .ok_or_else(|| EngineError::InvalidOperation("community order not finalized".to_string()))?;
        // Address verification is enforced by the underlying order
        self.order_manager.mark_shipped(&main_order_id)?;
        order.status = CommunityStatus::Shipped;
        tracing::info!(community_id, status = "shipped", "community order shipped");
        Ok(order.clone())
    }

    /// Mirror the main order's delivered transition
    pub fn mark_delivered(&self, community_id: &str) -> EngineResult<CommunityOrder> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if order.status != CommunityStatus::Shipped {
            return Err(EngineError::InvalidOperation(format!(
                "cannot deliver community order in {:?} status",
                order.status
            )));
        }
        let main_order_id = order
            .main_order_id
            .clone()
            .ok_or_else(|| EngineError::InvalidOperation("community order not finalized".to_string()))?;
        self.order_manager.mark_delivered(&main_order_id)?;
        order.status = CommunityStatus::Delivered;
        tracing::info!(community_id, status = "delivered", "community order delivered");
        Ok(order.clone())
    }

    /// Cancel: legal from `gathering` or `processing` only
    ///
    /// A finalized community order cancels its main order too.
    pub fn cancel(&self, community_id: &str) -> EngineResult<CommunityOrder> {
        let entry = self.entry(community_id)?;
        let mut order = entry.write();
        if !order.status.can_cancel() {
            return Err(EngineError::IllegalCancellation(
                format!("{:?}", order.status).to_lowercase(),
            ));
        }
        if let Some(main_order_id) = &order.main_order_id {
            self.order_manager.cancel(main_order_id)?;
        }
        order.status = CommunityStatus::Cancelled;
        tracing::info!(community_id, status = "cancelled", "community order cancelled");
        Ok(order.clone())
    }

    /// Recompute the aggregate summary from the full items mapping
    ///
    /// One group per participant; the delivery fee applies once to the
    /// shared schedule regardless of participant count. Gateway fees are
    /// settled per participant outside the engine and do not enter the
    /// aggregate.
    fn recompute_summary(&self, order: &mut CommunityOrder) -> EngineResult<()> {
        let groups: Vec<&[CartItem]> = order.items.values().map(Vec::as_slice).collect();
        order.order_summary = compute_summary(
            &groups,
            &order.delivery_schedule.delivery_option,
            &self.config.community_discount,
            self.config.tax_rate_percent,
            Decimal::ZERO,
        )?;
        Ok(())
    }
}
