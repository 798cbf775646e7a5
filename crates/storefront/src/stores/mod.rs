//! Stateful stores: the cart and the order list.

pub mod cart;
pub mod orders;

pub use cart::CartStore;
pub use orders::OrderStore;
