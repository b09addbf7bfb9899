//! The hotel bar's drinks and sales.

use chrono::{DateTime, Utc};
use hotel_portal_core::{DrinkId, DrinkSaleId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Cents;

/// A drink on the bar menu, as stored in the `drinks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkItem {
    pub id: DrinkId,
    pub name: String,
    pub price: Cents,
    pub stock_quantity: u32,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DrinkItem {
    /// Returns true if at least `quantity` units are in stock.
    #[must_use]
    pub fn in_stock(&self, quantity: u32) -> bool {
        quantity <= self.stock_quantity
    }
}

/// A recorded bar sale, as stored in the `drink_sales` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSale {
    pub id: DrinkSaleId,
    pub drink_id: DrinkId,
    pub quantity: u32,
    pub total_amount: Cents,
    /// Staff member who rang up the sale.
    pub barman_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_drink_without_image() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000201",
            "name": "Negroni",
            "price": 1400,
            "stock_quantity": 12,
            "category": "cocktails",
            "created_at": "2024-01-10T18:00:00Z",
        });
        let drink: DrinkItem = serde_json::from_value(json).expect("deserialize");
        assert_eq!(drink.image_url, None);
        assert!(drink.in_stock(12));
        assert!(!drink.in_stock(13));
        assert_eq!(drink.price.times(2).to_string(), "$28");
    }

    #[test]
    fn deserializes_sale() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000301",
            "drink_id": "00000000-0000-0000-0000-000000000201",
            "quantity": 2,
            "total_amount": 2800,
            "barman_id": "00000000-0000-0000-0000-000000000042",
            "created_at": "2024-01-10T21:15:00Z",
        });
        let sale: DrinkSale = serde_json::from_value(json).expect("deserialize");
        assert_eq!(sale.drink_id, DrinkId::from_u128(0x201));
        assert_eq!(sale.barman_id, UserId::from_u128(0x42));
    }
}
