//! Restaurant menu items.

use serde::{Deserialize, Serialize};

use crate::types::id::{MenuItemId, RestaurantId};

/// An item on a restaurant's menu.
///
/// The menu service names the item's own id `order_item_id` on reads; order
/// submissions echo it back as `restaurant_item_id`. The customer-facing
/// lookup omits the available quantity, so it defaults to zero there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "order_item_id")]
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    /// Non-negative unit price.
    pub price: f64,
    /// Units in stock, when the read variant exposes it.
    #[serde(rename = "quantity", default)]
    pub quantity_available: i64,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_menu_item_decodes_customer_variant() {
        // The generic lookup response has no quantity field.
        let raw = format!(
            r#"{{
                "order_item_id": "{}",
                "restaurant_id": "{}",
                "name": "Pad Thai",
                "price": 11.5,
                "description": "Rice noodles"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let item: MenuItem = serde_json::from_str(&raw).unwrap();
        assert_eq!(item.quantity_available, 0);
        assert!((item.price - 11.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_menu_item_id_field_name() {
        let item = MenuItem {
            id: MenuItemId::new(Uuid::new_v4()),
            restaurant_id: RestaurantId::new(Uuid::new_v4()),
            name: "Soup".to_string(),
            price: 4.0,
            quantity_available: 7,
            description: "Hot".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("order_item_id").is_some());
        assert!(json.get("id").is_none());
    }
}
