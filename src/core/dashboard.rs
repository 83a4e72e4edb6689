//! Dashboard summary aggregation.
//!
//! The admin dashboard shows three derived values: today's order count, the
//! current month's order count, and total paid revenue. They are recomputed
//! from scratch over the full order set on every fetch or change event -
//! no incremental maintenance, no caching. Calendar boundaries use the
//! server's UTC clock; `created_at` is stored as UTC, so the comparison is
//! consistent across hosts.

use crate::{
    core::status::PaymentStatus,
    entities::order,
    errors::Result,
};
use chrono::{DateTime, Datelike, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Derived dashboard metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Orders created since the start of the current UTC day.
    pub today_count: usize,
    /// Orders created since the start of the current UTC month.
    pub month_count: usize,
    /// Sum of `total_price` over orders with payment status Paid.
    pub total_revenue: f64,
}

impl DashboardSummary {
    /// The all-zero summary for an empty order set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            today_count: 0,
            month_count: 0,
            total_revenue: 0.0,
        }
    }
}

/// Computes the summary over a snapshot of the full order set.
///
/// Pure and O(n) in the number of orders: one pass, no allocation. An empty
/// slice yields the all-zero summary, not an error. `now` is the clock
/// reading that defines "today" and "this month".
#[must_use]
pub fn summarize(orders: &[order::Model], now: DateTime<Utc>) -> DashboardSummary {
    let today = now.date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let mut summary = DashboardSummary::empty();
    for order in orders {
        let created = order.created_at.date_naive();
        if created >= today {
            summary.today_count += 1;
        }
        if created >= month_start {
            summary.month_count += 1;
        }
        if order.payment_status == PaymentStatus::Paid.as_str() {
            summary.total_revenue += order.total_price;
        }
    }
    summary
}

/// Fetches the full order set and recomputes the summary against the
/// current UTC clock.
pub async fn dashboard_summary(db: &DatabaseConnection) -> Result<DashboardSummary> {
    let orders = crate::core::order::list_orders(db).await?;
    Ok(summarize(&orders, Utc::now()))
}
