pub mod extract;
pub mod public;
pub mod user;

use axum::{middleware::from_fn, response::Response, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::to_response;
use crate::middleware::logging::logging_middleware;
use crate::state::AppState;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_api_router(state.clone()))
        .merge(user_api_router(state));

    Router::new()
        .route("/", get(health))
        .nest("/api", api)
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Response {
    to_response(Json(json!({ "status": "ok" })), Ok(()))
}
