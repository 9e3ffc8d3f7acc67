#![allow(dead_code)]

use reqwest::{header, Client, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use std::sync::Arc;

use storefront::{
    api::create_api_router,
    entities::{seed_products, setup_schema},
    middleware::auth::TokenKeys,
    state::AppState,
};

pub const PASSWORD: &str = "Muzion15";

/// In-memory database with the schema and the starter catalog.
/// A single connection keeps every query on the same memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_products(&db).await.expect("Failed to seed products");
    db
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub db: Arc<DatabaseConnection>,
}

pub async fn spawn_app() -> TestApp {
    let state = AppState::new(test_db().await, TokenKeys::new("test-secret", 1));
    let db = state.db.clone();
    let app = create_api_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        address: format!("http://{addr}"),
        client: Client::new(),
        db,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, username: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "username": username, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to send register request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Registers a fresh user and returns an Authorization header for it.
    pub async fn signed_in(&self, username: &str) -> header::HeaderMap {
        assert_eq!(self.register(username).await.status(), StatusCode::CREATED);

        let login_body = self
            .login(username, PASSWORD)
            .await
            .json::<Value>()
            .await
            .expect("Failed to parse login response JSON");
        let token = login_body["token"]
            .as_str()
            .expect("Token not found in login response");

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))
                .expect("Failed to create Authorization header"),
        );
        headers
    }
}

/// `(product id, quantity)` pairs of a cart response, in order.
pub fn lines(body: &Value) -> Vec<(i64, i64)> {
    body.as_array()
        .expect("Cart response is not an array")
        .iter()
        .map(|line| {
            (
                line["product"]["id"].as_i64().expect("Product not resolved"),
                line["quantity"].as_i64().expect("Quantity missing"),
            )
        })
        .collect()
}
