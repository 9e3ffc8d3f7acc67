use axum::{
    extract::Extension,
    response::Response,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::api::extract::{AppPath, AppQuery};
use crate::error::{to_response, ApiError};
use crate::services::catalog::{Catalog, ProductFilter};

pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/products", get(get_products))
        .route("/products/categories", get(get_categories))
        .route("/products/:id", get(get_product))
        .layer(Extension(Catalog::new(db)))
}

async fn get_products(
    AppQuery(filter): AppQuery<ProductFilter>,
    Extension(catalog): Extension<Catalog>,
) -> Result<Response, ApiError> {
    let products = catalog.list(&filter).await?;
    Ok(to_response(Json(products), Ok(())))
}

async fn get_categories(Extension(catalog): Extension<Catalog>) -> Result<Response, ApiError> {
    let categories = catalog.categories().await?;
    Ok(to_response(Json(categories), Ok(())))
}

async fn get_product(
    AppPath(id): AppPath<i32>,
    Extension(catalog): Extension<Catalog>,
) -> Result<Response, ApiError> {
    let product = catalog.get(id).await?;
    Ok(to_response(Json(product), Ok(())))
}
