//! Discount policy configuration
//!
//! An explicit enumerated structure instead of loose filter objects: each
//! variant names one recognized discount dimension and its effect on the
//! subtotal. The calculator caps the resulting amount so it never exceeds
//! `subtotal + deliveryFee`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::money::{apply_rate, percent_to_rate};

/// One bulk/community tier: orders at or above `min_subtotal` get
/// `percent_off` off the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub min_subtotal: i64,
    pub percent_off: Decimal,
}

/// Discount rules applied to the combined subtotal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DiscountPolicy {
    #[default]
    None,
    /// Fixed amount off, minor units
    FlatOff { amount: i64 },
    /// Percentage off the subtotal
    PercentOff { percent: Decimal },
    /// Bulk/community tiers; the highest qualifying tier wins
    Tiered { tiers: Vec<DiscountTier> },
}

impl DiscountPolicy {
    pub fn validate(&self) -> EngineResult<()> {
        let check_percent = |percent: Decimal| -> EngineResult<()> {
            if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidInput(format!(
                    "discount percent must be between 0 and 100, got {}",
                    percent
                )));
            }
            Ok(())
        };
        match self {
            Self::None => Ok(()),
            Self::FlatOff { amount } => {
                if *amount < 0 {
                    return Err(EngineError::InvalidInput(format!(
                        "flat discount must be non-negative, got {}",
                        amount
                    )));
                }
                Ok(())
            }
            Self::PercentOff { percent } => check_percent(*percent),
            Self::Tiered { tiers } => {
                for tier in tiers {
                    if tier.min_subtotal < 0 {
                        return Err(EngineError::InvalidInput(
                            "tier minimum subtotal must be non-negative".to_string(),
                        ));
                    }
                    check_percent(tier.percent_off)?;
                }
                Ok(())
            }
        }
    }

    /// Discount amount for the given subtotal (uncapped)
    pub fn amount_for(&self, subtotal: i64) -> i64 {
        match self {
            Self::None => 0,
            Self::FlatOff { amount } => *amount,
            Self::PercentOff { percent } => apply_rate(subtotal, percent_to_rate(*percent)),
            Self::Tiered { tiers } => tiers
                .iter()
                .filter(|tier| subtotal >= tier.min_subtotal)
                .max_by_key(|tier| tier.min_subtotal)
                .map(|tier| apply_rate(subtotal, percent_to_rate(tier.percent_off)))
                .unwrap_or(0),
        }
    }
}
