//! Tahadu Storefront library.
//!
//! The stateful client side of a single-product storefront: cart state with
//! merge-by-identity semantics, a prerequisite-gating state machine (phone
//! verification, address capture, checkout) and order submission against the
//! remote order service.
//!
//! This crate provides the storefront functionality as a library, allowing
//! it to be tested and reused; the binary in `main.rs` wraps it in a
//! terminal shopping loop.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod format;
pub mod session;
pub mod storage;
pub mod stores;

pub use checkout::Checkout;
pub use error::{AppError, Result};
