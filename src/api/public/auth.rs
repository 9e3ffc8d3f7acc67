use axum::{extract::Extension, http::StatusCode, response::Response, routing::post, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::api::extract::AppJson;
use crate::error::{to_response, ApiError};
use crate::middleware::auth::TokenKeys;
use crate::services::accounts::{self, Credentials};
use crate::state::AppState;

pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register_user))
        .route("/auth/login", post(login))
        .layer(Extension(state.db))
        .layer(Extension(state.keys))
}

async fn register_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Response, ApiError> {
    payload.validate()?;

    let user = accounts::register(&db, payload).await?;
    Ok(to_response(
        (
            StatusCode::CREATED,
            Json(json!({
                "message": "User registered successfully",
                "user": { "id": user.id, "username": user.username }
            })),
        ),
        Ok(()),
    ))
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(keys): Extension<Arc<TokenKeys>>,
    AppJson(payload): AppJson<UserLogin>,
) -> Result<Response, ApiError> {
    let user = accounts::authenticate(&db, &payload.username, &payload.password).await?;
    let token = keys.generate_token(user.id)?;
    info!(user_id = user.id, "User logged in");

    Ok(to_response(
        Json(json!({
            "token": token,
            "user": { "id": user.id, "username": user.username }
        })),
        Ok(()),
    ))
}

#[derive(Deserialize)]
struct UserLogin {
    username: String,
    password: String,
}
