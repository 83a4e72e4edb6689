//! Public storefront handlers - menu, order submission, tracking, and
//! AI suggestions.

use crate::{
    catalog,
    core::{
        order::{self, ReferenceImage},
        suggestion::CakeSuggestion,
        validation::{self, OrderSubmission, ValidationErrors},
    },
    errors::{Error, Result},
    http::AppState,
    notify::OrderEvent,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

/// Returns the fixed catalog plus the configured delivery fee, so the
/// order form can render choices and preview the price.
pub async fn menu(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "categories": catalog::CAKE_CATEGORIES,
        "sizes": catalog::CAKE_SIZES,
        "flavors": catalog::CAKE_FLAVORS,
        "delivery_fee": state.config.delivery_fee,
    }))
}

/// Optional reference image attached to a submission.
#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    /// Original file name.
    pub file_name: String,
    /// Base64-encoded image bytes (standard alphabet).
    pub data_base64: String,
}

/// Order submission body: the raw form fields plus an optional image.
#[derive(Debug, Deserialize)]
pub struct SubmitOrderPayload {
    /// Raw form fields.
    #[serde(flatten)]
    pub submission: OrderSubmission,
    /// Optional reference image.
    #[serde(default)]
    pub reference_image: Option<ImagePayload>,
}

fn validation_failure(errors: &ValidationErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": errors })),
    )
        .into_response()
}

fn form_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "errors": ValidationErrors::form_error(message) })),
    )
        .into_response()
}

/// Creates an order from a storefront submission.
///
/// Validation failures come back as a 422 with the field-keyed error map;
/// image-upload and persistence failures land in the `_form` bucket with a
/// generic message, never exposing backend internals.
pub async fn submit_order(
    State(state): State<AppState>,
    Json(payload): Json<SubmitOrderPayload>,
) -> Response {
    let today = Utc::now().date_naive();
    let new_order =
        match validation::validate_submission(&payload.submission, today, state.config.delivery_fee)
        {
            Ok(new_order) => new_order,
            Err(errors) => return validation_failure(&errors),
        };

    let image = match payload.reference_image {
        Some(image) => match BASE64.decode(&image.data_base64) {
            Ok(bytes) => Some(ReferenceImage {
                file_name: image.file_name,
                bytes,
            }),
            Err(_) => {
                let mut errors = ValidationErrors::default();
                errors.push("reference_image", "Invalid image encoding.");
                return validation_failure(&errors);
            }
        },
        None => None,
    };

    match order::submit_order(&state.db, state.images.as_ref(), new_order, image).await {
        Ok(created) => {
            state.notifier.publish(OrderEvent::Created {
                id: created.id.clone(),
            });
            (StatusCode::CREATED, Json(json!({ "order": created }))).into_response()
        }
        Err(Error::ImageStore { message }) => {
            error!(error = %message, "Storage error during order creation");
            form_failure("Failed to upload reference image.")
        }
        Err(e) => {
            error!(error = %e, "Database error during order creation");
            form_failure("Database error: Failed to create order.")
        }
    }
}

/// Tracking lookup by order id.
///
/// An unknown id is a distinct not-found state (404 with `found: false`),
/// not an error.
pub async fn track_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    match order::get_order_by_id(&state.db, &id).await? {
        Some(order) => Ok(Json(json!({ "found": true, "order": order })).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "found": false })),
        )
            .into_response()),
    }
}

/// Suggestion request: a free-text occasion and a catalog category.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    /// What the cake is for.
    #[serde(default)]
    pub occasion: String,
    /// The catalog category of interest.
    #[serde(default)]
    pub category: String,
}

/// Produces an AI cake suggestion for the given occasion and category.
pub async fn suggest_cake(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<CakeSuggestion>> {
    let suggestion = state
        .suggestions
        .suggest(&request.occasion, &request.category)
        .await?;
    Ok(Json(suggestion))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::AppConfig, test_utils::setup_test_db};
    use axum::body::to_bytes;

    async fn test_state() -> AppState {
        let db = setup_test_db().await.unwrap();
        AppState::new(db, AppConfig::default()).unwrap()
    }

    fn valid_payload() -> SubmitOrderPayload {
        SubmitOrderPayload {
            submission: OrderSubmission {
                customer_name: "Jane Doe".to_string(),
                phone_number: "0771234567".to_string(),
                cake_category: "Birthday Cakes".to_string(),
                cake_size: "1kg".to_string(),
                flavor: "Chocolate Fudge".to_string(),
                message_on_cake: Some("Happy Birthday!".to_string()),
                delivery_date: "2999-01-01".to_string(),
                delivery_location: "123 Main St, Colombo".to_string(),
            },
            reference_image: None,
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_is_created() {
        let state = test_state().await;

        let response = submit_order(State(state), Json(valid_payload())).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["order"]["order_status"], "Pending");
        assert_eq!(body["order"]["total_price"], 3500.0);
        assert!(!body["order"]["id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submission_returns_field_keyed_errors() {
        let state = test_state().await;
        let mut payload = valid_payload();
        payload.submission.customer_name = String::new();
        payload.submission.cake_size = "3kg".to_string();

        let response = submit_order(State(state), Json(payload)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["customer_name"][0], "Name is required.");
        assert!(body["errors"]["cake_size"][0].is_string());
        // Nothing was persisted.
        assert!(body["order"].is_null());
    }

    #[tokio::test]
    async fn test_undecodable_image_rejected_before_any_write() {
        let state = test_state().await;
        let mut payload = valid_payload();
        payload.reference_image = Some(ImagePayload {
            file_name: "design.png".to_string(),
            data_base64: "not base64!!".to_string(),
        });

        let response = submit_order(State(state.clone()), Json(payload)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["reference_image"][0], "Invalid image encoding.");

        let orders = order::list_orders(&state.db).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_track_known_order_returns_it() {
        let state = test_state().await;
        let created = submit_order(State(state.clone()), Json(valid_payload())).await;
        let id = body_json(created).await["order"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = track_order(State(state), Path(id.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["found"], true);
        assert_eq!(body["order"]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_track_unknown_order_is_distinct_not_found() {
        let state = test_state().await;

        let response = track_order(State(state), Path("no-such-id".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["found"], false);
        assert!(body["order"].is_null());
    }

    #[tokio::test]
    async fn test_menu_lists_catalog_and_fee() {
        let state = test_state().await;

        let Json(body) = menu(State(state)).await;

        assert_eq!(body["delivery_fee"], 0.0);
        assert_eq!(body["sizes"][0]["size"], "1kg");
        assert_eq!(body["categories"].as_array().unwrap().len(), 4);
    }
}
