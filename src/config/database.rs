//! Database connection and table creation using `SeaORM`.
//!
//! This module handles the `SQLite` connection and creates the schema from
//! the entity definitions via `Schema::create_table_from_entity`, so the
//! database shape always matches the Rust structs without hand-written SQL.

use crate::entities::Order;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use sea_orm::sea_query::TableCreateStatement;

/// Establishes a connection to the order store.
///
/// The URL comes from the application configuration (environment override
/// `DATABASE_URL`, default local `SQLite` file).
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the orders table from the entity definition if it does not exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut order_table: TableCreateStatement = schema.create_table_from_entity(Order);
    order_table.if_not_exists();

    db.execute(builder.build(&order_table)).await?;

    Ok(())
}
