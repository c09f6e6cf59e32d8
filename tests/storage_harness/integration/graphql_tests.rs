//! GraphQL integration test macro for storage backends.
//!
//! The `graphql_integration_tests!` macro drives `/graphql/item` over HTTP and
//! checks the `{data, errors}` envelope together with what ends up stored.

/// Generate a GraphQL integration test suite for a storage backend.
///
/// `$factory` must produce an `impl ItemService + 'static` over an empty store.
///
/// # Generated Tests
///
/// ## Transport
/// - `test_graphql_get_query_param`: GET with `?query=`
/// - `test_graphql_post_json_body`: POST with a JSON body and variables
/// - `test_graphql_post_without_json_uses_query_param`
/// - `test_graphql_post_invalid_json`: 400 "Invalid request payload"
/// - `test_graphql_schema_endpoint`: SDL export
///
/// ## Execution
/// - `test_graphql_create_on_empty_store`: the canonical create example
/// - `test_graphql_list_empty`, `test_graphql_item_not_found`
/// - `test_graphql_update_and_delete`: delete echoes a blank item, then `item` is null
/// - `test_graphql_unknown_field_is_isolated`
/// - `test_graphql_parse_error`
/// - `test_graphql_shares_store_with_rest`
#[macro_export]
macro_rules! graphql_integration_tests {
    ($factory:expr) => {
        mod graphql_integration_tests {
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

            async fn post_query(server: &TestServer, query: &str) -> Value {
                let response = server
                    .post("/graphql/item")
                    .json(&json!({ "query": query }))
                    .await;
                response.assert_status(StatusCode::OK);
                response.json()
            }

            // ==============================================================
            // Transport
            // ==============================================================

            #[tokio::test]
            async fn test_graphql_get_query_param() {
                let server = make_server().await;

                let response = server
                    .get("/graphql/item")
                    .add_query_param("query", "{ list { id } }")
                    .await;

                response.assert_status(StatusCode::OK);
                response.assert_json(&json!({"data": {"list": []}, "errors": []}));
            }

            #[tokio::test]
            async fn test_graphql_post_json_body() {
                let server = make_server().await;

                let response = server
                    .post("/graphql/item")
                    .json(&json!({
                        "query": "mutation Make($name: String!) { create(name: $name) { name } }",
                        "variables": {"name": "Kettle"},
                        "operationName": "Make"
                    }))
                    .await;

                response.assert_status(StatusCode::OK);
                response.assert_json(&json!({
                    "data": {"create": {"name": "Kettle"}},
                    "errors": []
                }));
            }

            #[tokio::test]
            async fn test_graphql_post_without_json_uses_query_param() {
                let server = make_server().await;

                let response = server
                    .post("/graphql/item")
                    .add_query_param("query", r#"mutation { create(name: "Bell") { id } }"#)
                    .text("ignored")
                    .await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["data"]["create"]["id"].as_i64().map(|id| id > 0), Some(true));
            }

            #[tokio::test]
            async fn test_graphql_post_invalid_json() {
                let server = make_server().await;

                let response = server
                    .post("/graphql/item")
                    .content_type("application/json")
                    .bytes("{\"query\": ".into())
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({"error": "Invalid request payload"}));
            }

            #[tokio::test]
            async fn test_graphql_schema_endpoint() {
                let server = make_server().await;

                let response = server.get("/graphql/schema").await;

                response.assert_status(StatusCode::OK);
                let sdl = response.text();
                assert!(sdl.contains("type Item {"));
                assert!(sdl.contains("item(id: Int): Item"));
                assert!(sdl.contains(
                    "update(id: Int!, name: String, description: String, quality: String): Item"
                ));
            }

            // ==============================================================
            // Execution
            // ==============================================================

            #[tokio::test]
            async fn test_graphql_create_on_empty_store() {
                let server = make_server().await;

                let body = post_query(
                    &server,
                    r#"mutation{create(name:"Sword",quality:"common"){id,name,quality}}"#,
                )
                .await;

                assert_eq!(body["errors"], json!([]));
                let created = &body["data"]["create"];
                assert!(created["id"].as_i64().unwrap() > 0);
                assert_eq!(created["name"], "Sword");
                assert_eq!(created["quality"], "common");
                assert_eq!(created.as_object().unwrap().len(), 3);
            }

            #[tokio::test]
            async fn test_graphql_list_empty() {
                let server = make_server().await;

                let body = post_query(&server, "{ list { id name } }").await;

                assert_eq!(body, json!({"data": {"list": []}, "errors": []}));
            }

            #[tokio::test]
            async fn test_graphql_item_not_found() {
                let server = make_server().await;

                let body = post_query(&server, "{ item(id: 777) { id } }").await;

                assert_eq!(body, json!({"data": {"item": null}, "errors": []}));
            }

            #[tokio::test]
            async fn test_graphql_update_and_delete() {
                let server = make_server().await;
                let created = post_query(
                    &server,
                    r#"mutation {
                        create(name: "Cup", description: "Tin", quality: "common") { id }
                    }"#,
                )
                .await;
                let id = created["data"]["create"]["id"].as_i64().unwrap();

                let updated = post_query(
                    &server,
                    &format!(
                        r#"mutation {{
                            update(id: {}, quality: "rare") {{ name description quality }}
                        }}"#,
                        id
                    ),
                )
                .await;
                assert_eq!(
                    updated["data"]["update"],
                    json!({"name": "Cup", "description": "Tin", "quality": "rare"})
                );

                let deleted = post_query(
                    &server,
                    &format!(
                        "mutation {{ delete(id: {}) {{ id, name, description, quality }} }}",
                        id
                    ),
                )
                .await;
                assert_eq!(
                    deleted,
                    json!({
                        "data": {
                            "delete": {"id": id, "name": "", "description": "", "quality": ""}
                        },
                        "errors": []
                    })
                );

                let gone = post_query(&server, &format!("{{ item(id: {}) {{ id }} }}", id)).await;
                assert_eq!(gone, json!({"data": {"item": null}, "errors": []}));

                let again = post_query(
                    &server,
                    &format!("mutation {{ delete(id: {}) {{ id }} }}", id),
                )
                .await;
                assert_eq!(again["data"]["delete"], Value::Null);
                assert_eq!(again["errors"].as_array().unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_graphql_unknown_field_is_isolated() {
                let server = make_server().await;

                let body = post_query(&server, "{ list { id } missing { id } }").await;

                assert_eq!(body["data"]["list"], json!([]));
                assert_eq!(body["data"]["missing"], Value::Null);
                let errors = body["errors"].as_array().unwrap();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0]["path"], json!(["missing"]));
            }

            #[tokio::test]
            async fn test_graphql_parse_error() {
                let server = make_server().await;

                let body = post_query(&server, "{ list { id }").await;

                assert_eq!(body["data"], Value::Null);
                let errors = body["errors"].as_array().unwrap();
                assert_eq!(errors.len(), 1);
                assert!(
                    errors[0]["message"]
                        .as_str()
                        .unwrap()
                        .starts_with("Failed to parse query:")
                );
            }

            #[tokio::test]
            async fn test_graphql_shares_store_with_rest() {
                let server = make_server().await;
                let created: Value = server
                    .post("/item")
                    .json(&json!({"name": "Anvil", "quality": "epic"}))
                    .await
                    .json();

                let body = post_query(
                    &server,
                    &format!("{{ item(id: {}) {{ name quality }} }}", created["id"]),
                )
                .await;

                assert_eq!(body["data"]["item"], json!({"name": "Anvil", "quality": "epic"}));
            }
        }
    };
}
