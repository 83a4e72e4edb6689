//! Order lifecycle mutations - the only permitted writes after creation.
//!
//! Fulfillment status follows a guarded state machine: each status may only
//! advance to its immediate successor in the Pending → Accepted → Baking →
//! Ready → Delivered sequence. Jumps and backward moves require the
//! distinguished admin override, which bypasses the table but leaves an
//! audit line in the log. Payment status is an independent two-value axis
//! with unconditional writes. Concurrent writes to the same order race at
//! the store; last write wins, no conflict detection.

use crate::{
    core::status::{OrderStatus, PaymentStatus},
    entities::order,
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set};
use sea_orm::prelude::*;
use tracing::warn;

/// Loads an order or fails with not-found, shared by every mutation here.
async fn find_required(db: &DatabaseConnection, id: &str) -> Result<order::Model> {
    crate::core::order::get_order_by_id(db, id)
        .await?
        .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })
}

/// Advances an order's fulfillment status along the guarded state machine.
///
/// # Errors
/// * [`Error::OrderNotFound`] when the id is unknown (no other record is
///   touched).
/// * [`Error::InvalidTransition`] when `new_status` is not the current
///   status's immediate successor.
pub async fn set_order_status(
    db: &DatabaseConnection,
    id: &str,
    new_status: OrderStatus,
) -> Result<order::Model> {
    let order = find_required(db, id).await?;
    let current = OrderStatus::parse(&order.order_status)?;

    if !current.can_transition_to(new_status) {
        return Err(Error::InvalidTransition {
            from: current,
            to: new_status,
        });
    }

    write_order_status(db, order, new_status).await
}

/// Sets an order's fulfillment status to any value, bypassing the
/// transition table. Every use is audit-logged.
pub async fn set_order_status_override(
    db: &DatabaseConnection,
    id: &str,
    new_status: OrderStatus,
) -> Result<order::Model> {
    let order = find_required(db, id).await?;
    let current = OrderStatus::parse(&order.order_status)?;

    warn!(
        order_id = %id,
        from = %current,
        to = %new_status,
        "Admin override applied to order status"
    );

    write_order_status(db, order, new_status).await
}

async fn write_order_status(
    db: &DatabaseConnection,
    order: order::Model,
    new_status: OrderStatus,
) -> Result<order::Model> {
    let mut active: order::ActiveModel = order.into();
    active.order_status = Set(new_status.as_str().to_string());
    active.update(db).await.map_err(Into::into)
}

/// Sets an order's payment status. Unconditional within {Pending, Paid};
/// payment settles and un-settles independently of the fulfillment stage.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] when the id is unknown.
pub async fn set_payment_status(
    db: &DatabaseConnection,
    id: &str,
    new_status: PaymentStatus,
) -> Result<order::Model> {
    let order = find_required(db, id).await?;

    let mut active: order::ActiveModel = order.into();
    active.payment_status = Set(new_status.as_str().to_string());
    active.update(db).await.map_err(Into::into)
}
