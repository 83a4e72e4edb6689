//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and creating
//! orders with sensible defaults.

use crate::{
    config::database::create_tables,
    core::{order, validation::NewOrder},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the orders table initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// A validated order payload with sensible defaults.
///
/// # Defaults
/// * 1kg Birthday Cake, Chocolate Fudge, price 3500 (no delivery fee)
/// * delivery to "123 Main St, Colombo" on 2026-09-15
#[must_use]
pub fn test_new_order() -> NewOrder {
    NewOrder {
        customer_name: "Jane Doe".to_string(),
        phone_number: "0771234567".to_string(),
        cake_category: "Birthday Cakes".to_string(),
        cake_size: "1kg".to_string(),
        flavor: "Chocolate Fudge".to_string(),
        message_on_cake: Some("Happy Birthday!".to_string()),
        delivery_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap_or_default(),
        delivery_location: "123 Main St, Colombo".to_string(),
        total_price: 3500.0,
    }
}

/// Inserts a default test order.
pub async fn create_test_order(db: &DatabaseConnection) -> Result<entities::order::Model> {
    order::create_order(db, test_new_order(), None).await
}

/// Sets up a complete test environment with one order.
/// Returns (db, order) for common test scenarios.
pub async fn setup_with_order() -> Result<(DatabaseConnection, entities::order::Model)> {
    let db = setup_test_db().await?;
    let order = create_test_order(&db).await?;
    Ok((db, order))
}
