//! Admin dashboard handlers - order management, summary metrics, and the
//! change-event stream.
//!
//! Every handler checks the bearer token first. The token is the minimal
//! stand-in for the external auth provider's session; there is no user
//! store or sign-in flow in this service.

use crate::{
    core::{
        dashboard::{self, DashboardSummary},
        lifecycle, order,
        status::{OrderStatus, PaymentStatus},
    },
    entities::order::Model as OrderModel,
    errors::{Error, Result},
    http::{ActionResponse, AppState},
    notify::OrderEvent,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header::AUTHORIZATION},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

/// Checks the `Authorization: Bearer` header against the configured admin
/// token. Rejects everything while no token is configured.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err(Error::Unauthorized);
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if provided == Some(expected) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

/// Lists all orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OrderModel>>> {
    require_admin(&state, &headers)?;
    Ok(Json(order::list_orders(&state.db).await?))
}

/// Fulfillment-status change request.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    /// Target status, one of the five fixed values.
    pub status: String,
    /// When true, bypass the transition table (audit-logged).
    #[serde(default, rename = "override")]
    pub force: bool,
}

/// Changes an order's fulfillment status.
///
/// The guarded path only advances to the immediate successor; `override`
/// requests any target and is audit-logged.
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Json<ActionResponse>> {
    require_admin(&state, &headers)?;
    let new_status = OrderStatus::parse(&request.status)?;

    if request.force {
        lifecycle::set_order_status_override(&state.db, &id, new_status).await?;
    } else {
        lifecycle::set_order_status(&state.db, &id, new_status).await?;
    }

    state.notifier.publish(OrderEvent::StatusChanged {
        id,
        status: new_status,
    });
    Ok(Json(ActionResponse::ok("Order status updated.")))
}

/// Payment-status change request.
#[derive(Debug, Deserialize)]
pub struct PaymentChangeRequest {
    /// Target status, Pending or Paid.
    pub status: String,
}

/// Changes an order's payment status.
pub async fn update_payment_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<PaymentChangeRequest>,
) -> Result<Json<ActionResponse>> {
    require_admin(&state, &headers)?;
    let new_status = PaymentStatus::parse(&request.status)?;

    lifecycle::set_payment_status(&state.db, &id, new_status).await?;

    state.notifier.publish(OrderEvent::PaymentChanged {
        id,
        status: new_status,
    });
    Ok(Json(ActionResponse::ok("Payment status updated.")))
}

/// Hard-deletes an order after the dashboard's confirmation dialog.
pub async fn delete_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    require_admin(&state, &headers)?;

    order::delete_order(&state.db, &id).await?;

    state.notifier.publish(OrderEvent::Deleted { id });
    Ok(Json(ActionResponse::ok("Order deleted.")))
}

/// Returns the dashboard summary, recomputed from a fresh full read.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>> {
    require_admin(&state, &headers)?;
    Ok(Json(dashboard::dashboard_summary(&state.db).await?))
}

/// Streams order change events over SSE so dashboards re-fetch on change.
///
/// Lagged subscribers skip missed events and keep going; the summary and
/// list endpoints always recompute from scratch, so a missed event only
/// delays a refresh until the next one.
pub async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    require_admin(&state, &headers)?;

    let rx = state.notifier.subscribe();
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(data) => return Some((Ok(Event::default().data(data)), rx)),
                    Err(_) => continue,
                },
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::AppConfig,
        entities::order::Model,
        test_utils::{create_test_order, setup_test_db},
    };
    use axum::{http::HeaderValue, http::StatusCode, response::IntoResponse};

    async fn state_with_token(token: Option<&str>) -> AppState {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let config = AppConfig {
            admin_token: token.map(ToString::to_string),
            ..AppConfig::default()
        };
        AppState::new(db, config).unwrap()
    }

    /// A token-gated state over a real schema, holding one `Pending` order.
    async fn admin_state_with_order() -> (AppState, Model) {
        let db = setup_test_db().await.unwrap();
        let order = create_test_order(&db).await.unwrap();
        let config = AppConfig {
            admin_token: Some("secret".to_string()),
            ..AppConfig::default()
        };
        (AppState::new(db, config).unwrap(), order)
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_require_admin_accepts_matching_token() {
        let state = state_with_token(Some("secret")).await;
        assert!(require_admin(&state, &bearer("secret")).is_ok());
    }

    #[tokio::test]
    async fn test_require_admin_rejects_wrong_token() {
        let state = state_with_token(Some("secret")).await;
        let result = require_admin(&state, &bearer("guess"));
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));
    }

    #[tokio::test]
    async fn test_require_admin_rejects_missing_header() {
        let state = state_with_token(Some("secret")).await;
        let result = require_admin(&state, &HeaderMap::new());
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));
    }

    #[tokio::test]
    async fn test_require_admin_rejects_all_when_unconfigured() {
        let state = state_with_token(None).await;
        let result = require_admin(&state, &bearer("anything"));
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));
    }

    #[tokio::test]
    async fn test_guarded_advance_updates_and_reports_success() {
        let (state, order) = admin_state_with_order().await;

        let Json(response) = update_order_status(
            State(state.clone()),
            bearer("secret"),
            Path(order.id.clone()),
            Json(StatusChangeRequest {
                status: "Accepted".to_string(),
                force: false,
            }),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Order status updated.");
        let updated = order::get_order_by_id(&state.db, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.order_status, "Accepted");
    }

    #[tokio::test]
    async fn test_skip_ahead_status_change_is_conflict() {
        let (state, order) = admin_state_with_order().await;

        let result = update_order_status(
            State(state.clone()),
            bearer("secret"),
            Path(order.id.clone()),
            Json(StatusChangeRequest {
                status: "Delivered".to_string(),
                force: false,
            }),
        )
        .await;

        let error = result.unwrap_err();
        assert!(matches!(error, Error::InvalidTransition { .. }));
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);

        // The record is untouched by the rejected change.
        let unchanged = order::get_order_by_id(&state.db, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.order_status, "Pending");
    }

    #[tokio::test]
    async fn test_unknown_target_status_is_unprocessable() {
        let (state, order) = admin_state_with_order().await;

        let result = update_order_status(
            State(state),
            bearer("secret"),
            Path(order.id),
            Json(StatusChangeRequest {
                status: "Shipped".to_string(),
                force: false,
            }),
        )
        .await;

        let error = result.unwrap_err();
        assert!(matches!(error, Error::UnknownOrderStatus { .. }));
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
