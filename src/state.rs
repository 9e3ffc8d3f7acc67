use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::entities::{seed_products, setup_schema};
use crate::middleware::auth::{AuthState, TokenKeys};

/// Everything the routers need, built once at startup and handed down.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub keys: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, keys: TokenKeys) -> Self {
        Self {
            db: Arc::new(db),
            keys: Arc::new(keys),
        }
    }

    /// Connects to the database, creates the schema and seeds the catalog
    /// when asked to.
    pub async fn init(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.sqlx_logging(false);
        let db = Database::connect(options).await?;
        info!("Connected to database");

        setup_schema(&db).await?;
        if config.seed_products {
            seed_products(&db).await?;
        }

        Ok(Self::new(
            db,
            TokenKeys::new(&config.secret, config.token_ttl_hours),
        ))
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            db: self.db.clone(),
            keys: self.keys.clone(),
        }
    }

    pub async fn shutdown(self) -> Result<(), DbErr> {
        match Arc::try_unwrap(self.db) {
            Ok(db) => db.close().await,
            Err(_) => Ok(()),
        }
    }
}
