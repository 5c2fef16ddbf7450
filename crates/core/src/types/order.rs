//! Orders and order items as they travel over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{CourierId, CustomerId, MenuItemId, OrderId, RestaurantId};
use crate::types::status::OrderStatus;

/// A server-owned order, read-mostly on the client.
///
/// The cached copy is replaced wholesale on every successful re-fetch; the
/// client never merges incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// At most one courier; older records may lack the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_id: Option<CourierId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<RestaurantId>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

/// A line on an order as returned by the orders service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub restaurant_item_id: MenuItemId,
    pub quantity: u32,
    /// Unit price captured at order time; the list endpoint may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A line submitted inside an order creation request.
///
/// Exactly `{restaurant_item_id, quantity}` and nothing else; quantities are
/// validated as strictly positive before this type is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub restaurant_item_id: MenuItemId,
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_order_item_input_payload_shape() {
        let input = OrderItemInput {
            restaurant_item_id: MenuItemId::new(Uuid::new_v4()),
            quantity: 3,
        };
        let json = serde_json::to_value(&input).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object.get("quantity").unwrap(), 3);
        assert!(object.contains_key("restaurant_item_id"));
    }

    #[test]
    fn test_order_decodes_without_optional_fields() {
        let raw = format!(
            r#"{{
                "id": "{}",
                "customer_id": "{}",
                "status": "pending",
                "created_at": "2026-01-05T12:00:00Z",
                "updated_at": "2026-01-05T12:30:00Z"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let order: Order = serde_json::from_str(&raw).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.courier_id.is_none());
        assert!(order.items.is_empty());
    }
}
