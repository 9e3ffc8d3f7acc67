pub mod cart;
pub mod profile;

use axum::{middleware::from_fn_with_state, Router};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use cart::cart_router;
use profile::profile_router;

pub fn user_api_router(state: AppState) -> Router {
    Router::new()
        .merge(cart_router(state.db.clone()))
        .merge(profile_router(state.db.clone()))
        .layer(from_fn_with_state(state.auth_state(), auth_middleware))
}
