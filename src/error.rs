use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{accounts::AuthError, cart::CartError, catalog::CatalogError};

/// Error returned by every handler. The response carries a copy of it as an
/// extension so the logging middleware can report what went wrong.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Failed to validate: {0}")]
    ValidationFail(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DbError(String),
    #[error("Failed to hash password: {0}")]
    PasswordHashFailed(String),
    #[error("Failed to generate token")]
    TokenGenerationFailed,
    /// The request could not be extracted (bad JSON, path or query).
    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::ValidationFail(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Rejected(status, _) => *status,
            ApiError::DbError(_)
            | ApiError::PasswordHashFailed(_)
            | ApiError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the client gets to see. Server side failures stay in the logs.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            "Internal server error".to_owned()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = (self.status(), Json(json!({ "message": self.public_message() })));
        to_response(body, Err(self))
    }
}

pub fn to_response<T: IntoResponse>(
    response: T,               //The response that we are sending + StatusCode
    ext: Result<(), ApiError>, //The extension, that we want to give logging middleware
) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(ext);

    response
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::UserNotFound(_)
            | CartError::ProductNotFound(_)
            | CartError::ItemNotFound(_) => ApiError::NotFound(err.to_string()),
            CartError::InvalidQuantity(_) | CartError::QuantityTooLarge(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CartError::Storage(err) => ApiError::DbError(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::Storage(err) => ApiError::DbError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::UsernameTaken => ApiError::Conflict(err.to_string()),
            AuthError::Hash(value) => ApiError::PasswordHashFailed(value),
            AuthError::TokenGeneration => ApiError::TokenGenerationFailed,
            AuthError::Storage(err) => ApiError::DbError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationFail(err.to_string())
    }
}
