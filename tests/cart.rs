mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{lines, spawn_app};

#[tokio::test]
async fn cart_requires_authentication() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/cart"))
        .send()
        .await
        .expect("Failed to send get cart request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Not authorized, no token");

    let response = app
        .client
        .post(app.url("/api/cart"))
        .bearer_auth("garbage")
        .json(&json!({ "productId": 1 }))
        .send()
        .await
        .expect("Failed to send add request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_lifecycle_over_http() {
    let app = spawn_app().await;
    let headers = app.signed_in("cartuser").await;

    // Step 1: empty cart
    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send get cart request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));

    // Step 2: add two, then merge three more
    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 1, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to send add product request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(lines(&body), vec![(1, 2)]);
    assert_eq!(body[0]["product"]["name"], "Wireless Bluetooth Headphones");
    assert_eq!(body[0]["exceedsStock"], false);

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 1, "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(lines(&response.json::<Value>().await.unwrap()), vec![(1, 5)]);

    // Step 3: replace quantity
    let response = app
        .client
        .put(app.url("/api/cart/1"))
        .headers(headers.clone())
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send update request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lines(&response.json::<Value>().await.unwrap()), vec![(1, 1)]);

    // Step 4: zero removes
    let response = app
        .client
        .put(app.url("/api/cart/1"))
        .headers(headers.clone())
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn add_defaults_to_one() {
    let app = spawn_app().await;
    let headers = app.signed_in("defaulter").await;

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers)
        .json(&json!({ "productId": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lines(&response.json::<Value>().await.unwrap()), vec![(3, 1)]);
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let app = spawn_app().await;
    let headers = app.signed_in("lost").await;

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 9999, "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Product not found");

    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(headers)
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn add_with_zero_quantity_adds_one() {
    let app = spawn_app().await;
    let headers = app.signed_in("zero").await;

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers)
        .json(&json!({ "productId": 1, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(lines(&body), vec![(1, 1)]);
}

#[tokio::test]
async fn add_with_negative_quantity_is_bad_request() {
    let app = spawn_app().await;
    let headers = app.signed_in("negative").await;

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers)
        .json(&json!({ "productId": 1, "quantity": -3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Quantity should be greater than 0");
}

#[tokio::test]
async fn add_past_max_quantity_is_bad_request() {
    let app = spawn_app().await;
    let headers = app.signed_in("hoarder").await;

    for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
        let response = app
            .client
            .post(app.url("/api/cart"))
            .headers(headers.clone())
            .json(&json!({ "productId": 1, "quantity": i32::MAX }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
    }

    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(headers)
        .send()
        .await
        .unwrap();
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(lines(&body), vec![(1, i64::from(i32::MAX))]);
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = spawn_app().await;
    let headers = app.signed_in("sloppy").await;

    app.client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 1 }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .put(app.url("/api/cart/1"))
        .headers(headers.clone())
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["message"].is_string());

    let response = app
        .client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["message"].is_string());

    let response = app
        .client
        .delete(app.url("/api/cart/abc"))
        .headers(headers)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let app = spawn_app().await;
    let headers = app.signed_in("updater").await;

    let response = app
        .client
        .put(app.url("/api/cart/4"))
        .headers(headers)
        .json(&json!({ "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Item not found in cart");
}

#[tokio::test]
async fn remove_and_clear() {
    let app = spawn_app().await;
    let headers = app.signed_in("remover").await;

    for product_id in [2, 5, 7] {
        let response = app
            .client
            .post(app.url("/api/cart"))
            .headers(headers.clone())
            .json(&json!({ "productId": product_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // removing twice gives the same cart
    for _ in 0..2 {
        let response = app
            .client
            .delete(app.url("/api/cart/5"))
            .headers(headers.clone())
            .send()
            .await
            .expect("Failed to send remove product request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            lines(&response.json::<Value>().await.unwrap()),
            vec![(2, 1), (7, 1)]
        );
    }

    let response = app
        .client
        .delete(app.url("/api/cart"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send clear request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Cart cleared");

    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(headers)
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn summary_reports_totals_and_over_stock() {
    let app = spawn_app().await;
    let headers = app.signed_in("summer").await;

    // Laptop (id 3) has 20 in stock, ask for 21.
    app.client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 3, "quantity": 21 }))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "productId": 5, "quantity": 2 }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .get(app.url("/api/cart/summary"))
        .headers(headers)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();

    assert_eq!(body["itemCount"], 23);
    assert_eq!(body["overStock"], json!([3]));
    assert_eq!(body["items"][0]["exceedsStock"], true);
    let total = body["total"].as_f64().unwrap();
    assert!((total - (21.0 * 1299.99 + 2.0 * 19.99)).abs() < 1e-6);
}

#[tokio::test]
async fn carts_are_per_user() {
    let app = spawn_app().await;
    let alice = app.signed_in("alice").await;
    let bob = app.signed_in("bob").await;

    app.client
        .post(app.url("/api/cart"))
        .headers(alice.clone())
        .json(&json!({ "productId": 1, "quantity": 4 }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(bob)
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));

    let response = app
        .client
        .get(app.url("/api/cart"))
        .headers(alice)
        .send()
        .await
        .unwrap();
    assert_eq!(lines(&response.json::<Value>().await.unwrap()), vec![(1, 4)]);
}
