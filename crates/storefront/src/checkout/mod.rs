//! Checkout orchestrator: the prerequisite-gating state machine.
//!
//! Gates "add to cart" and "checkout" behind identity completeness and
//! sequences the capture of missing data without losing the shopper's
//! intent. The gate is evaluated fresh on every attempt: completing a
//! capture step does not automatically retry the gated action - the
//! shopper re-triggers it, which is intentional friction.

pub mod address;
pub mod phone;

pub use address::{AddressError, AddressWizard, Step, StepOutcome};
pub use phone::PhoneCapture;

use tahadu_core::{Address, CartLine, Order, PhoneNumber};

use crate::api::StoreApi;
use crate::error::Result;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::stores::{CartStore, OrderStore};

/// Result of evaluating the checkout prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Phone and address are both known; the action may proceed.
    Satisfied,
    /// No phone number: phone capture must run first. The address is not
    /// checked until the phone exists, so this never pairs with
    /// `AddressMissing` in one evaluation.
    PhoneMissing,
    /// Phone known, city missing: address capture must run first.
    AddressMissing,
}

/// Which screen the storefront shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Product,
    Orders,
}

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Order created; the cart is cleared and the orders view is shown.
    Submitted(Order),
    /// Gate not satisfied: open phone capture and stop.
    NeedsPhone,
    /// Gate not satisfied: open address capture and stop.
    NeedsAddress,
}

/// Outcome of an add-to-cart attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Merged into the cart.
    Added,
    /// Gate not satisfied: open phone capture and stop.
    NeedsPhone,
}

/// Drives the cart store, the session and the order store through the
/// purchase flow.
pub struct Checkout<A: StoreApi, S: KeyValueStore> {
    session: Session<A, S>,
    cart: CartStore<S>,
    orders: OrderStore<A>,
    view: ActiveView,
    submitting: bool,
}

impl<A: StoreApi, S: KeyValueStore> Checkout<A, S> {
    /// Wire up the stores around one API client and one cache.
    ///
    /// The session is constructed first and the order store subscribes to
    /// it, so an identity cached from a previous visit is already visible
    /// to the order store.
    pub fn new(api: A, storage: S) -> Self {
        let session = Session::new(api.clone(), storage.clone());
        let cart = CartStore::new(storage);
        let orders = OrderStore::new(api, session.subscribe());
        Self {
            session,
            cart,
            orders,
            view: ActiveView::Product,
            submitting: false,
        }
    }

    /// Evaluate the checkout prerequisites against the current identity.
    ///
    /// Checked fresh on every call; nothing is remembered between
    /// evaluations.
    #[must_use]
    pub fn check_requirements(&self) -> Requirement {
        match self.session.current() {
            None => Requirement::PhoneMissing,
            Some(user) if !user.has_address() => Requirement::AddressMissing,
            Some(_) => Requirement::Satisfied,
        }
    }

    /// Attempt to merge a candidate line into the cart.
    ///
    /// Requires a phone number only, not a full address.
    pub fn add_to_cart(&mut self, candidate: CartLine) -> AddOutcome {
        if self.session.phone().is_none() {
            return AddOutcome::NeedsPhone;
        }
        self.cart.add_item(candidate);
        AddOutcome::Added
    }

    /// Attempt to check out the current cart.
    ///
    /// When the gate is satisfied: submit the order, clear the cart, and
    /// switch to the orders view. The cart is cleared only after the order
    /// creation succeeded - a failed submission leaves cart and identity
    /// exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns the submission failure; its message is what the UI shows as
    /// a transient notification. The submitting flag is cleared on every
    /// exit.
    pub async fn checkout(&mut self) -> Result<CheckoutOutcome> {
        match self.check_requirements() {
            Requirement::PhoneMissing => Ok(CheckoutOutcome::NeedsPhone),
            Requirement::AddressMissing => Ok(CheckoutOutcome::NeedsAddress),
            Requirement::Satisfied => {
                self.submitting = true;
                let lines = self.cart.lines().to_vec();
                let result = self.orders.create_order(&lines).await;
                self.submitting = false;

                let order = result?;
                self.cart.clear();
                self.view = ActiveView::Orders;
                Ok(CheckoutOutcome::Submitted(order))
            }
        }
    }

    /// Submit a captured phone number: validate, then login.
    ///
    /// Does not auto-chain into address capture or retry a gated action;
    /// the shopper re-triggers whatever they were doing.
    ///
    /// # Errors
    ///
    /// Returns the validation failure (nothing was sent) or the remote
    /// login failure.
    pub async fn verify_phone(&mut self, input: &str) -> Result<()> {
        let phone = PhoneNumber::parse(input)?;
        self.session.login(phone).await?;
        self.orders.sync_identity().await
    }

    /// Submit a captured address to the profile.
    ///
    /// # Errors
    ///
    /// Returns the remote update failure, or a missing-phone error when
    /// called without an identity.
    pub async fn submit_address(&mut self, address: Address) -> Result<()> {
        self.session.update_profile(address).await?;
        self.orders.sync_identity().await
    }

    /// Forget the identity and drop the order history with it.
    pub async fn logout(&mut self) {
        self.session.logout();
        // Clearing never fetches, so the sync cannot fail here.
        let _ = self.orders.sync_identity().await;
    }

    /// Open a phone capture sheet pre-filled with the saved number.
    #[must_use]
    pub fn phone_capture(&self) -> PhoneCapture {
        PhoneCapture::new(self.session.phone())
    }

    /// The session provider.
    #[must_use]
    pub const fn session(&self) -> &Session<A, S> {
        &self.session
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Mutable cart store, for quantity edits and removals from the cart
    /// sheet (those are not gated).
    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// The order store.
    #[must_use]
    pub const fn orders(&self) -> &OrderStore<A> {
        &self.orders
    }

    /// Mutable order store, for explicit refreshes of the orders view.
    pub const fn orders_mut(&mut self) -> &mut OrderStore<A> {
        &mut self.orders
    }

    /// Which view the storefront shows.
    #[must_use]
    pub const fn view(&self) -> ActiveView {
        self.view
    }

    /// Show a view explicitly (for instance returning to the product).
    pub const fn set_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    /// Whether an order submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }
}
