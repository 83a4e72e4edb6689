//! Order entity - a customer's cake request.
//!
//! Each order carries the catalog selections, delivery details, the price
//! fixed at submission time, and two independent status axes: fulfillment
//! (`order_status`) and payment (`payment_status`). Orders are immutable
//! after creation except for those two status columns; there is no edit
//! endpoint for cake contents, customer info, or price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Opaque unique identifier (uuid v4), assigned at creation, never reused
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Creation timestamp (UTC), set once at insert
    pub created_at: DateTimeUtc,
    /// Customer's full name
    pub customer_name: String,
    /// Customer's contact phone number
    pub phone_number: String,
    /// Catalog category, e.g. "Birthday Cakes"
    pub cake_category: String,
    /// Catalog size label, e.g. "1kg"
    pub cake_size: String,
    /// Catalog flavor, e.g. "Chocolate Fudge"
    pub flavor: String,
    /// Optional message piped onto the cake (at most 100 characters)
    pub message_on_cake: Option<String>,
    /// Requested delivery date, never earlier than the submission day
    pub delivery_date: Date,
    /// Full delivery address
    pub delivery_location: String,
    /// Public URL of the uploaded reference image, if one was provided
    pub image_url: Option<String>,
    /// Price in LKR fixed at submission: size base price + delivery fee.
    /// Never recomputed, even if catalog prices change later.
    pub total_price: f64,
    /// Fulfillment stage: Pending, Accepted, Baking, Ready, or Delivered
    pub order_status: String,
    /// Payment settlement: Pending or Paid
    pub payment_status: String,
}

/// Orders have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
