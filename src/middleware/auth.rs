use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::entities::user::Entity as UserEntity;
use crate::error::ApiError;
use crate::services::accounts::AuthError;

/// Resolves the bearer token to a user and stores the [`Claims`] as a request
/// extension. Requests without a valid identity never reach the handlers.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = validate_token(&state.db, &state.keys, token).await?;
    debug!(user_id = claims.user_id, "Authenticated request");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub exp: usize,
}

#[derive(Clone)]
pub struct AuthState {
    pub db: Arc<DatabaseConnection>,
    pub keys: Arc<TokenKeys>,
}

/// HS256 signing material and token lifetime.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn generate_token(&self, user_id: i32) -> Result<String, AuthError> {
        let exp = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::TokenGeneration)?
            .timestamp() as usize;

        let claims = Claims { user_id, exp };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenGeneration)
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Checks the signature and expiry, then that the user still exists.
pub async fn validate_token(
    db: &DatabaseConnection,
    keys: &TokenKeys,
    token: &str,
) -> Result<Claims, AuthError> {
    let claims = keys.decode_token(token)?;

    match UserEntity::find_by_id(claims.user_id).one(db).await? {
        Some(_) => Ok(claims),
        None => Err(AuthError::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_user_id() {
        let keys = TokenKeys::new("test-secret", 1);
        let token = keys.generate_token(42).unwrap();
        assert_eq!(keys.decode_token(&token).unwrap().user_id, 42);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenKeys::new("one", 1).generate_token(1).unwrap();
        assert!(matches!(
            TokenKeys::new("two", 1).decode_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret", -2);
        let token = keys.generate_token(1).unwrap();
        assert!(matches!(
            keys.decode_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
