//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`], and the HTTP
//! layer maps each variant onto a status code and a user-safe message.
//! Backend internals (database, suggestion service) are never surfaced to
//! callers verbatim.

use crate::core::status::OrderStatus;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failure.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (blob storage, config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No order exists with the given id.
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A status string outside the fixed order-status set.
    #[error("Unknown order status: {value}")]
    UnknownOrderStatus {
        /// The rejected value.
        value: String,
    },

    /// A status string outside the fixed payment-status set.
    #[error("Unknown payment status: {value}")]
    UnknownPaymentStatus {
        /// The rejected value.
        value: String,
    },

    /// A guarded status change that the transition table does not allow.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the order currently holds.
        from: OrderStatus,
        /// Status the caller asked for.
        to: OrderStatus,
    },

    /// Reference-image storage failure.
    #[error("Image storage error: {message}")]
    ImageStore {
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// Suggestion backend failure (call failed, timed out, or empty output).
    #[error("Suggestion error: {message}")]
    Suggestion {
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// Admin surface accessed without a valid token.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
