use dotenvy::dotenv;
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable `{0}`")]
    Missing(&'static str),
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub secret: String,
    pub token_ttl_hours: i64,
    pub seed_products: bool,
}

impl Config {
    /// Reads the environment, after loading `.env` when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let config = Self {
            database_url: var_or("DATABASE_URL", "sqlite://storefront.db?mode=rwc".to_owned())?,
            host: var_or("HOST", "0.0.0.0".to_owned())?,
            port: var_or("PORT", 3000)?,
            secret: env::var("SECRET").map_err(|_| ConfigError::Missing("SECRET"))?,
            token_ttl_hours: var_or("TOKEN_TTL_HOURS", 24)?,
            seed_products: var_or("SEED_PRODUCTS", false)?,
        };

        if config.secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "SECRET",
                reason: "must not be empty".to_owned(),
            });
        }
        if config.token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_HOURS",
                reason: "must be positive".to_owned(),
            });
        }

        info!(
            host = %config.host,
            port = config.port,
            seed_products = config.seed_products,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
        Err(_) => {
            debug!("{key} not set, using default");
            Ok(default)
        }
    }
}
