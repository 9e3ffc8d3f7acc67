use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use validator::Validate;

use crate::entities::user::{self, Entity as UserEntity};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authorized, no token")]
    MissingToken,
    #[error("Not authorized, token failed")]
    InvalidToken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Failed to generate token")]
    TokenGeneration,
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 3, max = 32, message = "Username must be 3 to 32 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

pub async fn register(
    db: &DatabaseConnection,
    credentials: Credentials,
) -> Result<user::Model, AuthError> {
    let username = credentials.username.trim().to_owned();

    if UserEntity::find()
        .filter(user::Column::Username.eq(&*username))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AuthError::UsernameTaken);
    }

    let new_user = user::ActiveModel {
        username: Set(username),
        password: Set(hash_password(&credentials.password)?),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = UserEntity::insert(new_user).exec(db).await.map_err(|err| {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::UsernameTaken,
            _ => AuthError::Storage(err),
        }
    })?;

    let model = UserEntity::find_by_id(result.last_insert_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AuthError::Storage(DbErr::RecordNotFound("user vanished after insert".to_owned()))
        })?;
    info!(user_id = model.id, username = %model.username, "Registered user");
    Ok(model)
}

pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, AuthError> {
    let model = UserEntity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    model.check_hash(password)?;
    Ok(model)
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hash(err.to_string()))
}
