//! HTTP surface - routing, shared state, and error mapping.
//!
//! Two route groups share one `axum` router: the public storefront
//! (menu, order submission, tracking, suggestions) and the token-gated
//! admin surface (order management, dashboard, change-event stream).
//! Every component dependency lives in [`AppState`] and is injected at
//! construction; nothing is module-level global.

/// Admin dashboard handlers
pub mod admin;
/// Public storefront handlers
pub mod storefront;

use crate::{
    config::AppConfig,
    core::{image::LocalImageStore, image::ReferenceImageStore, suggestion::SuggestionService},
    errors::{Error, Result},
    notify::ChangeNotifier,
};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Shared per-process application state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Order store connection (one shared pool per process).
    pub db: DatabaseConnection,
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Suggestion gateway.
    pub suggestions: Arc<SuggestionService>,
    /// Reference-image blob store.
    pub images: Arc<dyn ReferenceImageStore>,
    /// Order change publisher.
    pub notifier: ChangeNotifier,
}

impl AppState {
    /// Wires the application state from a database connection and config.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Result<Self> {
        let suggestions = Arc::new(SuggestionService::from_settings(&config.suggestion)?);
        let images: Arc<dyn ReferenceImageStore> = Arc::new(LocalImageStore::new(
            config.image_dir.clone(),
            config.image_base_url.clone(),
        ));
        Ok(Self {
            db,
            config: Arc::new(config),
            suggestions,
            images,
            notifier: ChangeNotifier::new(),
        })
    }
}

/// Uniform mutation response: `{success, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    /// Whether the operation was applied.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl ActionResponse {
    /// A successful outcome with the given message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::OrderNotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::UnknownOrderStatus { .. } | Error::UnknownPaymentStatus { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::InvalidTransition { .. } => (StatusCode::CONFLICT, self.to_string()),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            // Only empty-input suggestion errors surface; backend failures
            // already resolved to the fallback inside the service.
            Error::Suggestion { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            Error::ImageStore { .. } => {
                error!(error = %self, "Reference image storage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to upload reference image.".to_string(),
                )
            }
            // Backend internals are logged, never sent to the client.
            Error::Database(_) | Error::Io(_) | Error::Config { .. } => {
                error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (
            status,
            Json(ActionResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Builds the application router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/menu", get(storefront::menu))
        .route("/api/orders", post(storefront::submit_order))
        .route("/api/orders/{id}", get(storefront::track_order))
        .route("/api/suggestions", post(storefront::suggest_cake))
        .route("/api/admin/orders", get(admin::list_orders))
        .route(
            "/api/admin/orders/{id}/status",
            put(admin::update_order_status),
        )
        .route(
            "/api/admin/orders/{id}/payment",
            put(admin::update_payment_status),
        )
        .route("/api/admin/orders/{id}", delete(admin::delete_order))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/events", get(admin::events))
        .with_state(state)
}

/// Serves the router until shutdown is requested.
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::from)?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    info!("Shutdown signal received.");
}
