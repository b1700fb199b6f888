//! Core error types for the Tipfolio engine.
//!
//! This module defines store-agnostic error types. Storage-specific failures
//! (connectivity, authorization, missing indexes) are converted to these types
//! by the storage layer.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::records::PaymentMethod;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tip engine.
///
/// Validation rejections are recoverable user-input problems and carry a
/// specific actionable message. Store errors indicate a failed round-trip and
/// are surfaced verbatim at the call site, never retried silently.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(#[from] ValidationRejection),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for document store round-trips.
///
/// This enum uses `String` for all error details, allowing a storage layer to
/// convert backend-specific errors into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached. The action may be retried by the user;
    /// it is never retried automatically (duplicate-write hazard).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation for authorization reasons. Indicates
    /// a configuration problem rather than a user input problem.
    #[error("Permission denied by store: {0}")]
    PermissionDenied(String),

    /// The store cannot satisfy a filtered/ordered read without an index.
    /// Reads degrade to an empty set with this indicator.
    #[error("Query requires an index: {0}")]
    MissingIndex(String),

    /// The addressed document was not found.
    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Rejection reasons produced by the tip rule engine.
///
/// Each variant names one distinct failed check so the caller can present a
/// specific message. All rejections are recoverable: the user fixes the input
/// and resubmits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationRejection {
    /// No payment method was explicitly selected.
    #[error("Select a payment method")]
    MissingMethod,

    /// The amount is zero or negative.
    #[error("Enter an amount greater than zero")]
    InvalidAmount,

    /// The amount exceeds the ceiling for the selected method.
    #[error("{method} entries cannot exceed {limit}")]
    AmountOverLimit { method: PaymentMethod, limit: Decimal },

    /// The record is dated after today.
    #[error("The date cannot be in the future")]
    FutureDate,

    /// A peer-support entry is missing a peer name, or the name contains
    /// characters outside the accepted set.
    #[error("Enter a valid peer name: 2-50 letters, numbers, spaces, hyphens or periods")]
    InvalidPeerName,
}
