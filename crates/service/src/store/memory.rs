//! In-process fallback store.
//!
//! One RwLock over all collections: mutating operations take the write lock,
//! reads share the read lock and never observe a partially-applied mutation.
//! Nothing survives process exit.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, Filter};
use crate::errors::ServiceError;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(doc: &mut Value) -> Result<(), ServiceError> {
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| ServiceError::Validation("document must be a JSON object".into()))?;
        if !obj.get("id").map(Value::is_string).unwrap_or(false) {
            obj.insert("id".into(), json!(Uuid::new_v4().simple().to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, ServiceError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Value>, ServiceError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert(&self, collection: &str, mut doc: Value) -> Result<Value, ServiceError> {
        Self::assign_id(&mut doc)?;
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Value>) -> Result<(), ServiceError> {
        let mut prepared = Vec::with_capacity(docs.len());
        for mut doc in docs {
            Self::assign_id(&mut doc)?;
            prepared.push(doc);
        }
        // Single write-lock hold so readers see all of the batch or none.
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().extend(prepared);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn insert_assigns_random_string_ids() {
        let store = MemoryStore::new();
        let a = store.insert("users", json!({"email": "a@x.com"})).await.unwrap();
        let b = store.insert("users", json!({"email": "b@x.com"})).await.unwrap();
        let id_a = a["id"].as_str().unwrap();
        let id_b = b["id"].as_str().unwrap();
        assert!(!id_a.is_empty());
        assert_ne!(id_a, id_b);
    }

    #[tokio::test]
    async fn insert_preserves_explicit_id() {
        let store = MemoryStore::new();
        let doc = store.insert("dishes", json!({"id": "7", "name": "Vada"})).await.unwrap();
        assert_eq!(doc["id"], "7");
    }

    #[tokio::test]
    async fn insert_rejects_non_object_documents() {
        let store = MemoryStore::new();
        assert!(store.insert("users", json!("not an object")).await.is_err());
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert("dishes", json!({"n": n, "kind": "x"})).await.unwrap();
        }
        let docs = store.find_all("dishes", &Filter::new()).await.unwrap();
        let order: Vec<i64> = docs.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn filter_narrows_find_count_and_delete() {
        let store = MemoryStore::new();
        store.insert("users", json!({"type": "cook", "email": "a@x.com"})).await.unwrap();
        store.insert("users", json!({"type": "customer", "email": "b@x.com"})).await.unwrap();
        store.insert("users", json!({"type": "cook", "email": "c@x.com"})).await.unwrap();

        let cooks = Filter::new().eq("type", "cook");
        assert_eq!(store.count("users", &cooks).await.unwrap(), 2);
        let found = store.find_one("users", &cooks).await.unwrap().unwrap();
        assert_eq!(found["email"], "a@x.com");

        assert_eq!(store.delete_many("users", &cooks).await.unwrap(), 2);
        assert_eq!(store.count("users", &Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_collection_reads_as_empty() {
        let store = MemoryStore::new();
        assert!(store.find_all("orders", &Filter::new()).await.unwrap().is_empty());
        assert_eq!(store.count("orders", &Filter::new()).await.unwrap(), 0);
        assert_eq!(store.delete_many("orders", &Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_inserts_lose_no_updates() {
        const WORKERS: usize = 8;
        const PER_WORKER: usize = 50;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for w in 0..WORKERS {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for n in 0..PER_WORKER {
                    store
                        .insert("users", json!({"email": format!("u{w}-{n}@x.com")}))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let docs = store.find_all("users", &Filter::new()).await.unwrap();
        assert_eq!(docs.len(), WORKERS * PER_WORKER);
        let ids: HashSet<String> =
            docs.iter().map(|d| d["id"].as_str().unwrap().to_string()).collect();
        assert_eq!(ids.len(), WORKERS * PER_WORKER);
    }
}
