//! Order store: fetches and creates orders for the current identity.
//!
//! Holds the order list most-recent-first with explicit loading/error
//! state. Subscribes to identity changes: when the phone number becomes
//! known the history is re-fetched, when it goes away the list is cleared
//! so no orders leak across identities.

use tokio::sync::watch;

use tahadu_core::{CartLine, Order, OrderId, OrderItem, PhoneNumber, UserProfile};

use crate::api::{CreateOrderRequest, StoreApi};
use crate::error::{AppError, Result};

/// Owns the local order list.
pub struct OrderStore<A> {
    api: A,
    identity: watch::Receiver<Option<UserProfile>>,
    orders: Vec<Order>,
    loading: bool,
    error: Option<String>,
    last_phone: Option<PhoneNumber>,
}

impl<A: StoreApi> OrderStore<A> {
    /// Create an order store subscribed to `identity`.
    pub fn new(api: A, identity: watch::Receiver<Option<UserProfile>>) -> Self {
        let last_phone = identity
            .borrow()
            .as_ref()
            .map(|user| user.phone_number.clone());
        Self {
            api,
            identity,
            orders: Vec::new(),
            loading: false,
            error: None,
            last_phone,
        }
    }

    /// The local order list, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Whether a remote call is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the last remote failure, cleared on the next attempt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the local list with the service's order history.
    ///
    /// A no-op when no phone number is known: returns immediately and
    /// leaves all state untouched.
    ///
    /// # Errors
    ///
    /// Returns the remote failure after storing its message in `error`; the
    /// local list is untouched on failure.
    pub async fn fetch_orders(&mut self) -> Result<()> {
        let Some(phone) = self.current_phone() else {
            return Ok(());
        };

        self.loading = true;
        self.error = None;
        let result = self.api.list_orders(&phone).await;
        self.loading = false;

        match result {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Submit the cart lines as a new order.
    ///
    /// Sends only `{color, quantity}` per line - prices are recomputed
    /// server-side. On success the returned order is prepended to the local
    /// list; on failure the list is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingPhone`] when no identity is known, or the
    /// remote failure after storing its message in `error`.
    pub async fn create_order(&mut self, lines: &[CartLine]) -> Result<Order> {
        let Some(phone) = self.current_phone() else {
            return Err(AppError::MissingPhone);
        };

        let request = CreateOrderRequest {
            phone_number: phone,
            cart_items: lines
                .iter()
                .map(|line| OrderItem {
                    color: line.product_id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        };

        self.loading = true;
        self.error = None;
        let result = self.api.create_order(&request).await;
        self.loading = false;

        match result {
            Ok(order) => {
                self.orders.insert(0, order.clone());
                Ok(order)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Fetch a single order. Does not touch the local list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingPhone`] when no identity is known, or the
    /// remote failure.
    pub async fn fetch_order(&self, id: OrderId) -> Result<Order> {
        let Some(phone) = self.current_phone() else {
            return Err(AppError::MissingPhone);
        };
        Ok(self.api.order_detail(id, &phone).await?)
    }

    /// React to an identity change since the last synchronization.
    ///
    /// Phone became known: re-fetch the history. Phone went away: clear the
    /// list. Same phone (for instance an address-only update): no-op.
    ///
    /// # Errors
    ///
    /// Propagates a failed re-fetch; the change still counts as seen, so
    /// the caller can retry with `fetch_orders` directly.
    pub async fn sync_identity(&mut self) -> Result<()> {
        let phone = self
            .identity
            .borrow_and_update()
            .as_ref()
            .map(|user| user.phone_number.clone());

        if phone == self.last_phone {
            return Ok(());
        }
        self.last_phone = phone.clone();

        match phone {
            Some(_) => self.fetch_orders().await,
            None => {
                self.orders.clear();
                self.error = None;
                Ok(())
            }
        }
    }

    fn current_phone(&self) -> Option<PhoneNumber> {
        self.identity
            .borrow()
            .as_ref()
            .map(|user| user.phone_number.clone())
    }
}
