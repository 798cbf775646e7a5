//! Tahadu Core - Shared domain types and cart logic.
//!
//! This crate provides the types used across all Tahadu components:
//! - `storefront` - Customer-facing storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no persistence. Cart operations take an immutable snapshot and
//! return a new one, which keeps the merge and clamp rules independently
//! testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for phone numbers, variant IDs, order records
//! - [`cart`] - The cart snapshot and its merge/clamp operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
