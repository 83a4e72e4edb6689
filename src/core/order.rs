//! Order repository operations - creation, lookup, listing, and deletion.
//!
//! Orders are inserted once with a fresh uuid and `Pending`/`Pending`
//! statuses and are never edited afterwards except through the lifecycle
//! operations in [`crate::core::lifecycle`]. Creation with a reference image
//! is a two-step saga: upload first, insert second, and remove the uploaded
//! blob if the insert fails so no orphaned file is left behind.

use crate::{
    core::{
        image::{ReferenceImageStore, StoredImage},
        status::{OrderStatus, PaymentStatus},
        validation::NewOrder,
    },
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::warn;

/// An uploaded reference image, as received from the submission form.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    /// Original file name, used to derive the stored name.
    pub file_name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Inserts a validated order with a fresh id, creation timestamp, and
/// `Pending` fulfillment/payment statuses.
pub async fn create_order(
    db: &DatabaseConnection,
    new_order: NewOrder,
    image_url: Option<String>,
) -> Result<order::Model> {
    let model = order::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        created_at: Set(chrono::Utc::now()),
        customer_name: Set(new_order.customer_name),
        phone_number: Set(new_order.phone_number),
        cake_category: Set(new_order.cake_category),
        cake_size: Set(new_order.cake_size),
        flavor: Set(new_order.flavor),
        message_on_cake: Set(new_order.message_on_cake),
        delivery_date: Set(new_order.delivery_date),
        delivery_location: Set(new_order.delivery_location),
        image_url: Set(image_url),
        total_price: Set(new_order.total_price),
        order_status: Set(OrderStatus::Pending.as_str().to_string()),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Creates an order from a submission, handling the optional reference image.
///
/// The image (when present) is uploaded before the insert; if the insert
/// then fails, the uploaded blob is removed as the compensating action. A
/// failed compensation is logged and the original insert error is returned.
pub async fn submit_order(
    db: &DatabaseConnection,
    store: &dyn ReferenceImageStore,
    new_order: NewOrder,
    image: Option<ReferenceImage>,
) -> Result<order::Model> {
    let stored: Option<StoredImage> = match image {
        Some(image) => Some(store.upload(&image.file_name, &image.bytes).await?),
        None => None,
    };
    let image_url = stored.as_ref().map(|s| s.public_url.clone());

    match create_order(db, new_order, image_url).await {
        Ok(order) => Ok(order),
        Err(err) => {
            if let Some(stored) = stored
                && let Err(cleanup_err) = store.remove(&stored).await
            {
                warn!(
                    image = %stored.name,
                    error = %cleanup_err,
                    "Failed to remove uploaded image after insert failure"
                );
            }
            Err(err)
        }
    }
}

/// Finds an order by its id, returning `None` when it does not exist.
///
/// This is the tracking lookup: customers can only reach an order by
/// knowing its id, there is no customer-facing listing surface.
pub async fn get_order_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<order::Model>> {
    Order::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Retrieves all orders, newest first. Admin surface only.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes an order. No soft-delete flag, no audit trail.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] when no order has the given id; nothing
/// else is touched in that case.
pub async fn delete_order(db: &DatabaseConnection, id: &str) -> Result<()> {
    let order = get_order_by_id(db, id)
        .await?
        .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })?;

    let active: order::ActiveModel = order.into();
    active.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Image store double that records uploads and removals.
    struct RecordingStore {
        uploads: Mutex<Vec<String>>,
        removals: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                removals: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReferenceImageStore for RecordingStore {
        async fn upload(&self, file_name: &str, _bytes: &[u8]) -> Result<StoredImage> {
            self.uploads.lock().unwrap().push(file_name.to_string());
            Ok(StoredImage {
                name: file_name.to_string(),
                public_url: format!("/images/{file_name}"),
            })
        }

        async fn remove(&self, stored: &StoredImage) -> Result<()> {
            self.removals.lock().unwrap().push(stored.name.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_create_order_sets_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let order = create_order(&db, test_new_order(), None).await?;

        assert!(!order.id.is_empty());
        assert_eq!(order.order_status, "Pending");
        assert_eq!(order.payment_status, "Pending");
        assert_eq!(order.total_price, 3500.0);
        assert_eq!(order.image_url, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_order(&db, test_new_order(), None).await?;
        let found = get_order_by_id(&db, &created.id).await?;

        assert_eq!(found, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_order_by_id(&db, "no-such-id").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_unique() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_order(&db, test_new_order(), None).await?;
        let b = create_order(&db, test_new_order(), None).await?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    /// Inserts a default order with an explicit id and creation timestamp,
    /// so listing order is deterministic regardless of insert order.
    async fn insert_order_at(
        db: &DatabaseConnection,
        id: &str,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<order::Model> {
        let new_order = test_new_order();
        let model = order::ActiveModel {
            id: Set(id.to_string()),
            created_at: Set(created_at),
            customer_name: Set(new_order.customer_name),
            phone_number: Set(new_order.phone_number),
            cake_category: Set(new_order.cake_category),
            cake_size: Set(new_order.cake_size),
            flavor: Set(new_order.flavor),
            message_on_cake: Set(new_order.message_on_cake),
            delivery_date: Set(new_order.delivery_date),
            delivery_location: Set(new_order.delivery_location),
            image_url: Set(None),
            total_price: Set(new_order.total_price),
            order_status: Set(OrderStatus::Pending.as_str().to_string()),
            payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        };
        model.insert(db).await.map_err(Into::into)
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() -> Result<()> {
        use chrono::{TimeZone, Utc};

        let db = setup_test_db().await?;

        // Inserted oldest-last to rule out insertion-order coincidence.
        insert_order_at(&db, "mid", Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()).await?;
        insert_order_at(&db, "newest", Utc.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap()).await?;
        insert_order_at(&db, "oldest", Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).unwrap()).await?;

        let listed = list_orders(&db).await?;
        let ids: Vec<&str> = listed.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["newest", "mid", "oldest"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let order = create_order(&db, test_new_order(), None).await?;
        delete_order(&db, &order.id).await?;

        assert!(get_order_by_id(&db, &order.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails_without_touching_others() -> Result<()> {
        let db = setup_test_db().await?;
        let existing = create_order(&db, test_new_order(), None).await?;

        let result = delete_order(&db, "no-such-id").await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: _ }));

        let still_there = get_order_by_id(&db, &existing.id).await?;
        assert_eq!(still_there, Some(existing));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_order_stores_image_url() -> Result<()> {
        let db = setup_test_db().await?;
        let store = RecordingStore::new();

        let image = ReferenceImage {
            file_name: "design.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let order = submit_order(&db, &store, test_new_order(), Some(image)).await?;

        assert_eq!(order.image_url.as_deref(), Some("/images/design.png"));
        assert_eq!(store.uploads.lock().unwrap().len(), 1);
        assert!(store.removals.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_order_without_image_skips_store() -> Result<()> {
        let db = setup_test_db().await?;
        let store = RecordingStore::new();

        let order = submit_order(&db, &store, test_new_order(), None).await?;

        assert_eq!(order.image_url, None);
        assert!(store.uploads.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_failure_removes_uploaded_image() -> Result<()> {
        // No tables created, so the insert fails after the upload succeeds.
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        let store = RecordingStore::new();

        let image = ReferenceImage {
            file_name: "design.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let result = submit_order(&db, &store, test_new_order(), Some(image)).await;

        assert!(matches!(result.unwrap_err(), Error::Database(_)));
        assert_eq!(store.uploads.lock().unwrap().len(), 1);
        assert_eq!(
            store.removals.lock().unwrap().as_slice(),
            ["design.png".to_string()]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_not_recomputed_after_creation() -> Result<()> {
        // The stored price stays whatever it was at submission time, even if
        // a different fee or catalog would apply now.
        let db = setup_test_db().await?;

        let mut new_order = test_new_order();
        new_order.total_price = 3850.0; // 3500 base + 350 fee at submission
        let order = create_order(&db, new_order, None).await?;

        let fetched = get_order_by_id(&db, &order.id).await?.unwrap();
        assert_eq!(fetched.total_price, 3850.0);
        Ok(())
    }
}
