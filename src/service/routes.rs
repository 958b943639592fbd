use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use log::warn;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::{ApiError, AppContext, MetaResponse, PredictRequest, PredictResponse};

/// Build the axum [`Router`] with all routes.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/meta", get(meta_handler))
        .route("/predict", post(predict_handler))
        .with_state(context)
}

/// CORS for the configured origins, with any method and header and no credentials
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!("Ignoring invalid CORS origin {origin}: {e}"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root_handler() -> Json<Value> {
    Json(json!({"message": "API running. Use POST /predict."}))
}

async fn health_handler() -> Json<Value> {
    Json(json!({"ok": true}))
}

async fn meta_handler(State(context): State<Arc<AppContext>>) -> Json<MetaResponse> {
    Json(context.meta())
}

async fn predict_handler(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload?;

    context.predict(&request).map(Json)
}
