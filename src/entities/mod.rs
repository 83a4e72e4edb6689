//! `SeaORM` entity definitions for database tables.

/// Order entity - customer cake orders
pub mod order;

pub use order::Entity as Order;
