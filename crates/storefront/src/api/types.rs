//! Wire types for the remote order service.

use serde::{Deserialize, Serialize};

use tahadu_core::{OrderItem, PhoneNumber};

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone_number: PhoneNumber,
}

/// Body of `POST /order`.
///
/// Prices are deliberately absent: the service recomputes totals from its
/// own catalog and is the source of truth for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub phone_number: PhoneNumber,
    pub cart_items: Vec<OrderItem>,
}

/// Error body convention: non-success responses may carry a `message`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
