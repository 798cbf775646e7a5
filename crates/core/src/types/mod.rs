//! Core types for Tahadu.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod phone;
pub mod profile;
pub mod status;

pub use id::{OrderId, VariantId};
pub use order::{Order, OrderItem};
pub use phone::{PhoneError, PhoneNumber};
pub use profile::{Address, UserProfile};
pub use status::OrderStatus;
