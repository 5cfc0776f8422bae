//! Engine configuration
//!
//! # Environment Variables
//!
//! All settings can be overridden via environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | TAX_RATE_PERCENT | 7.5 | Sales tax rate percentage |
//! | COMMUNITY_DISCOUNT_TIERS | built-in tiers | JSON array of `{minSubtotal, percentOff}` |
//!
//! # Example
//!
//! ```ignore
//! TAX_RATE_PERCENT=8.25 COMMUNITY_DISCOUNT_TIERS='[{"minSubtotal":20000,"percentOff":7}]' cargo run
//! ```

use rust_decimal::Decimal;

use crate::summary::{DiscountPolicy, DiscountTier};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sales tax rate as a percentage (7.5 means 7.5%)
    pub tax_rate_percent: Decimal,
    /// Discount policy applied to individual checkouts
    pub checkout_discount: DiscountPolicy,
    /// Discount policy applied to community orders (bulk tiers)
    pub community_discount: DiscountPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: Decimal::new(75, 1),
            checkout_discount: DiscountPolicy::None,
            community_discount: DiscountPolicy::Tiered {
                tiers: vec![
                    DiscountTier {
                        min_subtotal: 10_000,
                        percent_off: Decimal::new(5, 0),
                    },
                    DiscountTier {
                        min_subtotal: 25_000,
                        percent_off: Decimal::new(10, 0),
                    },
                ],
            },
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tax_rate_percent: std::env::var("TAX_RATE_PERCENT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.tax_rate_percent),
            checkout_discount: defaults.checkout_discount,
            community_discount: std::env::var("COMMUNITY_DISCOUNT_TIERS")
                .ok()
                .and_then(|value| serde_json::from_str::<Vec<DiscountTier>>(&value).ok())
                .map(|tiers| DiscountPolicy::Tiered { tiers })
                .unwrap_or(defaults.community_discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tax_rate_percent, Decimal::new(75, 1));
        assert!(matches!(
            config.community_discount,
            DiscountPolicy::Tiered { .. }
        ));
    }

    #[test]
    fn test_tier_json_shape() {
        let tiers: Vec<DiscountTier> =
            serde_json::from_str(r#"[{"minSubtotal":20000,"percentOff":7}]"#).unwrap();
        assert_eq!(tiers[0].min_subtotal, 20_000);
        assert_eq!(tiers[0].percent_off, Decimal::new(7, 0));
    }
}
