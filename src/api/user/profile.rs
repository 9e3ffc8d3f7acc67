use axum::{extract::Extension, response::Response, routing::get, Json, Router};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::json;
use std::sync::Arc;

use crate::entities::user::Entity as UserEntity;
use crate::error::{to_response, ApiError};
use crate::middleware::auth::Claims;

pub fn profile_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/auth/me", get(get_profile))
        .layer(Extension(db))
}

async fn get_profile(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let user = UserEntity::find_by_id(claims.user_id)
        .one(&*db)
        .await
        .map_err(|err| ApiError::DbError(err.to_string()))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_owned()))?;

    Ok(to_response(
        Json(json!({
            "id": user.id,
            "username": user.username
        })),
        Ok(()),
    ))
}
