//! Order and payment status types.
//!
//! `OrderStatus` is the fulfillment-stage axis, a fixed ordered sequence:
//! Pending → Accepted → Baking → Ready → Delivered. The guarded mutation
//! path only ever advances one step along this sequence; anything else
//! requires the explicit admin override (see [`crate::core::lifecycle`]).
//! `PaymentStatus` is the independent payment-settled axis.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfillment stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Submitted, awaiting acceptance
    Pending,
    /// Accepted by the bakery
    Accepted,
    /// In the oven
    Baking,
    /// Ready for pickup/delivery
    Ready,
    /// Handed over to the customer (terminal)
    Delivered,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::Baking,
        Self::Ready,
        Self::Delivered,
    ];

    /// The stored string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Baking => "Baking",
            Self::Ready => "Ready",
            Self::Delivered => "Delivered",
        }
    }

    /// Parses a stored or submitted status string.
    ///
    /// # Errors
    /// Returns [`Error::UnknownOrderStatus`] for anything outside the fixed
    /// five-value set.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Baking" => Ok(Self::Baking),
            "Ready" => Ok(Self::Ready),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(Error::UnknownOrderStatus {
                value: value.to_string(),
            }),
        }
    }

    /// The next stage in the lifecycle, `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Accepted),
            Self::Accepted => Some(Self::Baking),
            Self::Baking => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether the guarded path allows moving from `self` to `to`.
    ///
    /// Only the immediate successor is allowed; backward moves, skips, and
    /// self-assignment are all rejected.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment settlement state of an order, independent of fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment not yet received
    Pending,
    /// Payment settled
    Paid,
}

impl PaymentStatus {
    /// Both payment states.
    pub const ALL: [Self; 2] = [Self::Pending, Self::Paid];

    /// The stored string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }

    /// Parses a stored or submitted payment-status string.
    ///
    /// # Errors
    /// Returns [`Error::UnknownPaymentStatus`] for anything outside
    /// {Pending, Paid}.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            _ => Err(Error::UnknownPaymentStatus {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
