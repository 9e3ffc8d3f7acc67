pub mod auth;
pub mod product;

use axum::Router;

use crate::state::AppState;
use auth::auth_router;
use product::product_router;

pub fn public_api_router(state: AppState) -> Router {
    Router::new()
        .merge(product_router(state.db.clone()))
        .merge(auth_router(state))
}
