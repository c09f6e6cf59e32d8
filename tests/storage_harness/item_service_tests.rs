//! Macro-generated test suite for `ItemService` contract validation.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_get`: insert assigns an id, get returns the same fields
//! - `test_get_nonexistent`: get of an unknown id returns None
//! - `test_list_empty`: list on empty store returns empty vec
//! - `test_list_ordered_and_capped`: list is ordered by id and honours the limit
//! - `test_update_existing`: every field is overwritten
//! - `test_update_nonexistent`: update of an unknown id is NotFound
//! - `test_delete_existing`: delete then get returns None
//! - `test_delete_nonexistent`: delete of an unknown id is NotFound
//!
//! ## Edge Cases
//! - `test_ids_are_unique`: increasing ids even for identical payloads
//! - `test_empty_optional_fields`: empty description and quality are stored
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `ItemService` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty `impl ItemService + 'static`.
/// It is re-evaluated for each test.
#[macro_export]
macro_rules! item_service_tests {
    ($factory:expr) => {
        mod item_service_contract_tests {
            use super::*;
            use items::core::{Item, ItemService, LIST_CAP, NewItem, StoreError};
            use std::collections::HashSet;
            use std::sync::Arc;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_get() {
                let service = $factory;

                let created = service.insert(sample_item("Sword")).await.unwrap();
                assert!(created.id > 0);
                assert_eq!(created.name, "Sword");
                assert_eq!(created.description, "Sword description");
                assert_eq!(created.quality, "common");

                let fetched = service.get(created.id).await.unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert_eq!(service.get(4242).await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let items = service.list(LIST_CAP).await.unwrap();
                assert_count(&items, 0);
            }

            #[tokio::test]
            async fn test_list_ordered_and_capped() {
                let service = $factory;
                for name in ["a", "b", "c", "d", "e"] {
                    service.insert(sample_item(name)).await.unwrap();
                }

                let all = service.list(LIST_CAP).await.unwrap();
                assert_count(&all, 5);
                assert_ordered_by_id(&all);
                let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

                let capped = service.list(3).await.unwrap();
                assert_count(&capped, 3);
                assert_eq!(capped[..], all[..3]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let created = service.insert(sample_item("Crowbar")).await.unwrap();

                let changed = Item {
                    id: created.id,
                    name: "Pry bar".to_string(),
                    description: String::new(),
                    quality: "rare".to_string(),
                };
                service.update(&changed).await.unwrap();

                assert_eq!(service.get(created.id).await.unwrap(), Some(changed));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let ghost = NewItem::new("Ghost").with_id(777);

                let err = service.update(&ghost).await.unwrap_err();

                assert_eq!(err, StoreError::NotFound { id: 777 });
                assert_count(&service.list(LIST_CAP).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let keep = service.insert(sample_item("Keep")).await.unwrap();
                let gone = service.insert(sample_item("Gone")).await.unwrap();

                service.delete(gone.id).await.unwrap();

                assert_eq!(service.get(gone.id).await.unwrap(), None);
                assert_eq!(service.list(LIST_CAP).await.unwrap(), vec![keep]);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                let err = service.delete(31337).await.unwrap_err();
                assert!(err.is_not_found(), "unexpected error: {}", err);
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_ids_are_unique() {
                let service = $factory;
                let first = service.insert(NewItem::new("Twin")).await.unwrap();
                let second = service.insert(NewItem::new("Twin")).await.unwrap();
                assert!(
                    first.id < second.id,
                    "ids not increasing: {} then {}",
                    first.id,
                    second.id
                );
            }

            #[tokio::test]
            async fn test_empty_optional_fields() {
                let service = $factory;
                let created = service.insert(NewItem::new("Bare")).await.unwrap();

                let fetched = service.get(created.id).await.unwrap().unwrap();
                assert_eq!(fetched.description, "");
                assert_eq!(fetched.quality, "");
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let service: Arc<dyn ItemService> = Arc::new($factory);

                let mut handles = Vec::new();
                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .insert(sample_item(&format!("item-{}", i)))
                            .await
                            .unwrap()
                    }));
                }

                let mut ids = HashSet::new();
                for handle in handles {
                    ids.insert(handle.await.unwrap().id);
                }

                assert_eq!(ids.len(), 10);
                assert_count(&service.list(LIST_CAP).await.unwrap(), 10);
            }
        }
    };
}
