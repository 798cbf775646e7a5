//! Unified error handling for the storefront client.
//!
//! Local, recoverable failures stop at the component boundary: validation
//! errors never reach the network, remote failures are converted to a
//! human-readable message at the store boundary, and persistence failures
//! are logged and swallowed where they occur. `AppError` is what the
//! orchestrator and the binary see.

use thiserror::Error;

use tahadu_core::PhoneError;

use crate::api::ApiError;
use crate::checkout::address::AddressError;
use crate::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote service call failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Local cache operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Phone number failed client-side validation.
    #[error("{0}")]
    Phone(#[from] PhoneError),

    /// Address capture input failed validation.
    #[error("{0}")]
    Address(#[from] AddressError),

    /// An operation that needs an identity ran without one.
    #[error("not logged in: a phone number is required")]
    MissingPhone,
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
