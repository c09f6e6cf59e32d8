//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! an `ItemService` through full REST round-trips:
//! JSON → HTTP request → handler → ItemService → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$factory` must produce an `impl ItemService + 'static` over an empty store.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create`: POST 201, id assigned, body echoed
/// - `test_rest_get`: GET 200 + stored item
/// - `test_rest_list`: GET 200 + array in id order
/// - `test_rest_update`: PUT 200, every field replaced
/// - `test_rest_delete`: DELETE 200 echoing the id, then GET 404
///
/// ## Error handling
/// - `test_rest_invalid_id`: non-numeric id → 400 "Invalid item ID"
/// - `test_rest_not_found`: unknown id → 404 "Item not found"
/// - `test_rest_invalid_payload`: malformed JSON → 400 "Invalid request payload"
/// - `test_rest_empty_name`: empty name → 400, nothing stored
/// - `test_rest_update_nonexistent` / `test_rest_delete_nonexistent`: 404
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use items::core::ItemService;
            use serde_json::{Value, json};
            use std::sync::Arc;

            async fn make_server() -> TestServer {
                let service: Arc<dyn ItemService> = Arc::new($factory);
                crate::storage_harness::integration::build_test_server(service)
            }

            async fn create(server: &TestServer, body: Value) -> Value {
                let response = server.post("/item").json(&body).await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let body = create(
                    &server,
                    json!({"name": "Sword", "description": "Sharp", "quality": "common"}),
                )
                .await;

                assert!(body["id"].as_i64().unwrap() > 0);
                assert_eq!(body["name"], "Sword");
                assert_eq!(body["description"], "Sharp");
                assert_eq!(body["quality"], "common");
            }

            #[tokio::test]
            async fn test_rest_create_ignores_client_id() {
                let server = make_server().await;

                let body = create(&server, json!({"id": 999, "name": "Shield"})).await;

                assert_ne!(body["id"], 999);
                assert_eq!(body["description"], "");
                assert_eq!(body["quality"], "");
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Lamp", "quality": "rare"})).await;

                let response = server.get(&format!("/item/{}", created["id"])).await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;
                for name in ["one", "two", "three"] {
                    create(&server, json!({"name": name})).await;
                }

                let response = server.get("/items").await;

                response.assert_status(StatusCode::OK);
                let body: Vec<Value> = response.json();
                let names: Vec<&str> = body.iter().map(|i| i["name"].as_str().unwrap()).collect();
                assert_eq!(names, vec!["one", "two", "three"]);
            }

            #[tokio::test]
            async fn test_rest_list_empty() {
                let server = make_server().await;

                let response = server.get("/items").await;

                response.assert_status(StatusCode::OK);
                response.assert_json(&json!([]));
            }

            #[tokio::test]
            async fn test_rest_update() {
                let server = make_server().await;
                let created = create(
                    &server,
                    json!({"name": "Rope", "description": "Long", "quality": "common"}),
                )
                .await;
                let path = format!("/item/{}", created["id"]);

                let response = server
                    .put(&path)
                    .json(&json!({"name": "Rope", "quality": "rare"}))
                    .await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["id"], created["id"]);
                assert_eq!(body["quality"], "rare");
                // full replacement: omitted fields are cleared
                assert_eq!(body["description"], "");

                let stored: Value = server.get(&path).await.json();
                assert_eq!(stored, body);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Torch"})).await;
                let path = format!("/item/{}", created["id"]);

                let response = server.delete(&path).await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["id"], created["id"]);
                assert_eq!(body["name"], "");

                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Errors
            // ==============================================================

            #[tokio::test]
            async fn test_rest_invalid_id() {
                let server = make_server().await;

                let response = server.get("/item/abc").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({"error": "Invalid item ID"}));
            }

            #[tokio::test]
            async fn test_rest_not_found() {
                let server = make_server().await;

                let response = server.get("/item/12345").await;

                response.assert_status(StatusCode::NOT_FOUND);
                response.assert_json(&json!({"error": "Item not found"}));
            }

            #[tokio::test]
            async fn test_rest_invalid_payload() {
                let server = make_server().await;

                let response = server
                    .post("/item")
                    .content_type("application/json")
                    .bytes("{ not json".into())
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({"error": "Invalid request payload"}));
            }

            #[tokio::test]
            async fn test_rest_empty_name() {
                let server = make_server().await;

                let response = server.post("/item").json(&json!({"name": ""})).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let items: Vec<Value> = server.get("/items").await.json();
                assert!(items.is_empty());
            }

            #[tokio::test]
            async fn test_rest_update_nonexistent() {
                let server = make_server().await;

                let response = server.put("/item/404").json(&json!({"name": "Nobody"})).await;

                response.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_delete_nonexistent() {
                let server = make_server().await;

                let response = server.delete("/item/404").await;

                response.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;

                let response = server.get("/health").await;

                response.assert_status(StatusCode::OK);
                response.assert_json(&json!({"status": "ok", "service": "items-rs"}));
            }
        }
    };
}
