use axum::{
    extract::Extension,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::extract::{AppJson, AppPath};
use crate::error::{to_response, ApiError};
use crate::middleware::auth::Claims;
use crate::services::cart::CartManager;

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_item).delete(clear_cart))
        .route("/cart/summary", get(get_summary))
        .route("/cart/:product_id", put(update_item).delete(remove_item))
        .layer(Extension(CartManager::new(db)))
}

async fn get_cart(
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let lines = carts.get_cart(claims.user_id).await?;
    Ok(to_response(Json(lines), Ok(())))
}

async fn get_summary(
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let summary = carts.summary(claims.user_id).await?;
    Ok(to_response(Json(summary), Ok(())))
}

async fn add_item(
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<AddItem>,
) -> Result<Response, ApiError> {
    let lines = carts
        .add_item(
            claims.user_id,
            payload.product_id,
            payload.quantity.unwrap_or(1),
        )
        .await?;
    Ok(to_response(Json(lines), Ok(())))
}

async fn update_item(
    AppPath(product_id): AppPath<i32>,
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<UpdateItem>,
) -> Result<Response, ApiError> {
    let lines = carts
        .update_item(claims.user_id, product_id, payload.quantity)
        .await?;
    Ok(to_response(Json(lines), Ok(())))
}

async fn remove_item(
    AppPath(product_id): AppPath<i32>,
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let lines = carts.remove_item(claims.user_id, product_id).await?;
    Ok(to_response(Json(lines), Ok(())))
}

async fn clear_cart(
    Extension(carts): Extension<CartManager>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    carts.clear_cart(claims.user_id).await?;
    Ok(to_response(
        Json(json!({
            "message": "Cart cleared"
        })),
        Ok(()),
    ))
}

//Structs
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AddItem {
    product_id: i32,
    quantity: Option<i32>,
}

#[derive(Deserialize, Debug)]
struct UpdateItem {
    quantity: i32,
}
