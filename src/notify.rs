//! Order change notification.
//!
//! A broadcast channel of order events, published after each successful
//! mutation so open dashboards know to re-fetch. This is the in-process
//! stand-in for the hosted provider's `subscribe` push: events only say
//! *that* something changed (and to which order); subscribers are expected
//! to re-read the full order set rather than patch state incrementally.
//! Publishing with no subscribers is a no-op.

use crate::core::status::{OrderStatus, PaymentStatus};
use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// A change to the order set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A new order was created.
    Created {
        /// Id of the new order.
        id: String,
    },
    /// An order's fulfillment status changed.
    StatusChanged {
        /// Id of the changed order.
        id: String,
        /// The new fulfillment status.
        status: OrderStatus,
    },
    /// An order's payment status changed.
    PaymentChanged {
        /// Id of the changed order.
        id: String,
        /// The new payment status.
        status: PaymentStatus,
    },
    /// An order was deleted.
    Deleted {
        /// Id of the deleted order.
        id: String,
    },
}

/// Shared publisher for order events.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<OrderEvent>,
}

impl ChangeNotifier {
    /// Creates a notifier with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: OrderEvent) {
        // send only fails when there are no receivers; that's fine.
        let _ = self.tx.send(event);
    }

    /// Opens a new subscription. Slow subscribers that lag past the channel
    /// capacity miss events and should re-fetch.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
