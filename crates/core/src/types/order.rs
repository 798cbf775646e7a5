//! Order records as returned by the remote service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, VariantId};
use super::status::OrderStatus;

/// One submitted line of an order.
///
/// Prices are not part of the submission; the service recomputes totals and
/// is trusted as the source of truth for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    /// Variant identity. The service contract names this field `color`
    /// because the catalog varies only by color.
    pub color: VariantId,
    /// Ordered quantity.
    pub quantity: u32,
}

/// An order as returned by the remote service.
///
/// Created once via the order store, then never mutated locally; refetching
/// replaces the whole local list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Service-assigned identity.
    pub id: OrderId,
    /// Submitted line items.
    pub items: Vec<OrderItem>,
    /// Fulfillment status, service-controlled.
    #[serde(default)]
    pub status: OrderStatus,
    /// Service-computed total.
    pub total_price: Decimal,
    /// Service-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_record() {
        let json = r#"{
            "id": 42,
            "items": [{"color": "golden-aqsa", "quantity": 2}],
            "status": "Processing",
            "total_price": "700",
            "created_at": "2025-02-14T18:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(42));
        assert_eq!(order.items[0].color.as_str(), "golden-aqsa");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_price, Decimal::from(700));
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        let json = r#"{
            "id": 1,
            "items": [],
            "total_price": "0",
            "created_at": "2025-02-14T18:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
