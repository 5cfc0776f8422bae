//! Cart Item Model

use serde::{Deserialize, Serialize};

/// Cart item snapshot - price is frozen at add-time
///
/// Once added to an order this record is immutable. If the catalog later
/// changes a price, existing snapshots are unaffected; the engine never
/// re-derives price from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog entry ID
    pub id: String,
    pub name: String,
    /// Unit price in minor currency units
    pub unit_price: i64,
    pub quantity: u32,
    /// List price before sale, in minor currency units (savings display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_price: Option<i64>,
    /// Image reference (URL or asset key)
    pub image: String,
    pub vendor_id: String,
    pub vendor_name: String,
}

impl CartItem {
    /// Line total in minor currency units
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }

    /// List-price-vs-sale-price delta for this line
    ///
    /// Zero when no list price is recorded or the item is not on sale.
    pub fn line_savings(&self) -> i64 {
        match self.list_price {
            Some(list) if list > self.unit_price => {
                (list - self.unit_price) * i64::from(self.quantity)
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: i64, quantity: u32, list_price: Option<i64>) -> CartItem {
        CartItem {
            id: "meal-1".to_string(),
            name: "Bento Box".to_string(),
            unit_price,
            quantity,
            list_price,
            image: "bento.jpg".to_string(),
            vendor_id: "vendor-1".to_string(),
            vendor_name: "Test Kitchen".to_string(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(1250, 3, None).line_total(), 3750);
    }

    #[test]
    fn test_line_savings() {
        assert_eq!(item(1000, 2, Some(1200)).line_savings(), 400);
        assert_eq!(item(1000, 2, None).line_savings(), 0);
        // List price below sale price never produces negative savings
        assert_eq!(item(1000, 2, Some(800)).line_savings(), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(item(1000, 1, None)).unwrap();
        assert!(json.get("unitPrice").is_some());
        assert!(json.get("vendorId").is_some());
        assert!(json.get("listPrice").is_none());
    }
}
