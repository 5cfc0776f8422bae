//! Payment gateway registry
//!
//! Reference data lookup by gateway type. The engine records which gateway
//! a checkout selected and consumes its `processing_fee` and
//! `is_available`; it never executes payment transactions.

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use shared::models::PaymentGateway;

/// In-memory payment gateway registry
#[derive(Debug, Default)]
pub struct GatewayRegistry {
    gateways: RwLock<Vec<PaymentGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the stock gateway set
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(PaymentGateway {
            id: "gw-card".to_string(),
            name: "Credit / Debit Card".to_string(),
            gateway_type: "card".to_string(),
            icon: "card.svg".to_string(),
            description: "Visa, Mastercard and Amex".to_string(),
            processing_fee: Decimal::new(29, 1), // 2.9%
            is_available: true,
        });
        registry.register(PaymentGateway {
            id: "gw-wallet".to_string(),
            name: "Digital Wallet".to_string(),
            gateway_type: "wallet".to_string(),
            icon: "wallet.svg".to_string(),
            description: "Apple Pay and Google Pay".to_string(),
            processing_fee: Decimal::new(15, 1), // 1.5%
            is_available: true,
        });
        registry.register(PaymentGateway {
            id: "gw-cod".to_string(),
            name: "Cash on Delivery".to_string(),
            gateway_type: "cod".to_string(),
            icon: "cash.svg".to_string(),
            description: "Pay the courier in cash".to_string(),
            processing_fee: Decimal::ZERO,
            is_available: true,
        });
        registry
    }

    /// Register a gateway, replacing any existing entry of the same type
    pub fn register(&self, gateway: PaymentGateway) {
        let mut gateways = self.gateways.write();
        gateways.retain(|existing| existing.gateway_type != gateway.gateway_type);
        gateways.push(gateway);
    }

    /// Look up a gateway by type, ignoring availability
    pub fn lookup(&self, gateway_type: &str) -> Option<PaymentGateway> {
        self.gateways
            .read()
            .iter()
            .find(|gateway| gateway.gateway_type == gateway_type)
            .cloned()
    }

    /// Select a gateway for checkout
    ///
    /// Unknown types are a payment mismatch; known-but-unavailable gateways
    /// are rejected with `GatewayUnavailable`.
    pub fn select(&self, gateway_type: &str) -> EngineResult<PaymentGateway> {
        let gateway = self
            .lookup(gateway_type)
            .ok_or_else(|| EngineError::PaymentMismatch(gateway_type.to_string()))?;
        if !gateway.is_available {
            return Err(EngineError::GatewayUnavailable(gateway.gateway_type));
        }
        Ok(gateway)
    }
}
