use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id;
use crate::state::AppState;

pub mod games;
pub mod predict;
pub mod reference;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id::attach_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Home banner
        .route("/games/hot", get(games::hot))
        // Detail view
        .route("/games/featured", get(games::featured))
        .route("/games/:id", get(games::detail))
        // Prediction flows
        .route("/predict/user", get(predict::by_user))
        .route("/predict/party", get(predict::party))
        .route("/predict/filters", get(predict::filters))
        // Select widget vocabularies
        .route("/reference/filters", get(reference::filters))
        .route("/reference/tags", get(reference::tags))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
