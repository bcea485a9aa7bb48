//! Integration tests for cart persistence across storefront restarts.

use axum::http::StatusCode;
use serde_json::{Value, json};
use tasty_eats_integration_tests::TestContext;
use tasty_eats_storefront::cart::CART_STORAGE_KEY;

fn cart_file(ctx: &TestContext) -> std::path::PathBuf {
    ctx.data_dir().join(format!("{CART_STORAGE_KEY}.json"))
}

fn read_json(path: &std::path::Path) -> Value {
    let raw = std::fs::read_to_string(path).unwrap_or_default();
    serde_json::from_str(&raw).unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_nothing_is_written_before_first_change() {
    let ctx = TestContext::new();
    ctx.get("/api/cart").await;
    assert!(!cart_file(&ctx).exists());
}

#[tokio::test]
async fn test_every_change_is_written_through() {
    let ctx = TestContext::new();

    ctx.post("/api/cart/items", &json!({ "id": "2" })).await;
    let stored = read_json(&cart_file(&ctx));
    assert_eq!(stored["version"], 1);
    assert_eq!(stored["items"][0]["id"], "2");
    assert_eq!(stored["items"][0]["quantity"], 1);

    ctx.put("/api/cart/items/2", &json!({ "quantity": 7 })).await;
    assert_eq!(read_json(&cart_file(&ctx))["items"][0]["quantity"], 7);

    ctx.delete("/api/cart").await;
    assert_eq!(read_json(&cart_file(&ctx))["items"], json!([]));
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/items", &json!({ "id": "3" })).await;
    ctx.post("/api/cart/items", &json!({ "id": "1" })).await;
    ctx.put("/api/cart/items/3", &json!({ "quantity": 2 })).await;
    let before = ctx.get("/api/cart").await.body;

    let ctx = ctx.restart();
    let after = ctx.get("/api/cart").await.body;

    assert_eq!(after, before);
    assert_eq!(after["item_count"], 3);
    assert!(ctx.notifier.all().is_empty());
}

#[tokio::test]
async fn test_malformed_cart_file_starts_empty() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/items", &json!({ "id": "1" })).await;
    std::fs::write(cart_file(&ctx), "{\"version\": 1, \"items\": [{\"id\": ").unwrap_or_default();

    let ctx = ctx.restart();
    let resp = ctx.get("/api/cart").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["items"], json!([]));
    assert!(!cart_file(&ctx).exists());

    // The store keeps working after recovery
    let resp = ctx.post("/api/cart/items", &json!({ "id": "6" })).await;
    assert_eq!(resp.body["cart"]["item_count"], 1);
    assert!(cart_file(&ctx).exists());
}

#[tokio::test]
async fn test_legacy_bare_array_is_read() {
    let ctx = TestContext::new();
    std::fs::write(
        cart_file(&ctx),
        r#"[{"id": "4", "name": "Beef Burger", "price": 10.99,
             "image": "https://img.example.com/4.jpg", "category": "Burger", "quantity": 2}]"#,
    )
    .unwrap_or_default();

    let ctx = ctx.restart();
    let resp = ctx.get("/api/cart").await;

    assert_eq!(resp.body["item_count"], 2);
    assert_eq!(resp.body["subtotal"], "21.98");
}

#[tokio::test]
async fn test_stored_zero_quantity_is_rejected() {
    let ctx = TestContext::new();
    std::fs::write(
        cart_file(&ctx),
        r#"{"version": 1, "items": [{"id": "4", "name": "Beef Burger", "price": "10.99",
             "image": "", "category": "Burger", "quantity": 0}]}"#,
    )
    .unwrap_or_default();

    let ctx = ctx.restart();
    assert_eq!(ctx.get("/api/cart/count").await.body["count"], 0);
}

#[tokio::test]
async fn test_stored_cart_too_large_to_total_is_discarded() {
    let ctx = TestContext::new();
    std::fs::write(
        cart_file(&ctx),
        r#"{"version": 1, "items": [{"id": "1", "name": "Margherita Pizza",
             "price": "79228162514264337593543950335", "image": "",
             "category": "Pizza", "quantity": 2}]}"#,
    )
    .unwrap_or_default();

    let ctx = ctx.restart();
    let resp = ctx.get("/api/cart").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["items"], json!([]));
    assert_eq!(resp.body["item_count"], 0);
    assert!(!cart_file(&ctx).exists());
}
