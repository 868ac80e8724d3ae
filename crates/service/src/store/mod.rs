//! Persistence abstraction over named entity collections.
//!
//! One [`DocumentStore`] contract, two implementations: Postgres JSONB
//! documents when the primary store answers the startup probe, an in-process
//! map otherwise. Callers hold a single [`Store`] handle and never branch on
//! which backend is active.

pub mod backend;
pub mod memory;
pub mod postgres;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

pub use backend::{Store, StoreMode};

pub const USERS: &str = "users";
pub const DISHES: &str = "dishes";

/// Structural match on named top-level fields; empty matches everything.
#[derive(Clone, Debug, Default)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object form, suitable for a JSONB containment predicate.
    pub fn as_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Equality on every named field. The memory backend evaluates this
    /// directly; the Postgres backend expresses the same predicate as `@>`.
    pub fn matches(&self, doc: &Value) -> bool {
        self.0.iter().all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

/// CRUD surface over named collections of JSON documents. Both backends
/// return the same field sets and types: string ids, ISO-8601 timestamps.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All matching documents. Ordering is insertion order and stays stable
    /// within one running process.
    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, ServiceError>;

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Value>, ServiceError>;

    /// Insert one document; the returned copy carries the assigned string id.
    /// A pre-set `id` field is preserved (used by seeding).
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, ServiceError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError>;

    /// Bulk removal; seeding only, not exposed to request-time callers.
    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError>;

    /// Bulk insert; seeding only.
    async fn insert_many(&self, collection: &str, docs: Vec<Value>) -> Result<(), ServiceError>;
}

/// Typed view over one collection.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), collection: self.collection, _marker: PhantomData }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str) -> Self {
        Self { store, collection, _marker: PhantomData }
    }

    fn decode(&self, doc: Value) -> Result<T, ServiceError> {
        serde_json::from_value(doc)
            .map_err(|e| ServiceError::Db(format!("corrupt {} document: {e}", self.collection)))
    }

    fn encode(&self, entity: &T) -> Result<Value, ServiceError> {
        serde_json::to_value(entity)
            .map_err(|e| ServiceError::Db(format!("encode {} document: {e}", self.collection)))
    }

    pub async fn find_all(&self, filter: &Filter) -> Result<Vec<T>, ServiceError> {
        let docs = self.store.find_all(self.collection, filter).await?;
        docs.into_iter().map(|doc| self.decode(doc)).collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>, ServiceError> {
        match self.store.find_one(self.collection, filter).await? {
            Some(doc) => Ok(Some(self.decode(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(&self, entity: &T) -> Result<T, ServiceError> {
        let doc = self.store.insert(self.collection, self.encode(entity)?).await?;
        self.decode(doc)
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, ServiceError> {
        self.store.count(self.collection, filter).await
    }

    pub async fn delete_many(&self, filter: &Filter) -> Result<u64, ServiceError> {
        self.store.delete_many(self.collection, filter).await
    }

    pub async fn insert_many(&self, entities: &[T]) -> Result<(), ServiceError> {
        let docs = entities.iter().map(|e| self.encode(e)).collect::<Result<Vec<_>, _>>()?;
        self.store.insert_many(self.collection, docs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_matches_everything() {
        let f = Filter::new();
        assert!(f.is_empty());
        assert!(f.matches(&json!({"a": 1})));
        assert!(f.matches(&json!({})));
    }

    #[test]
    fn filter_is_equality_on_named_fields() {
        let f = Filter::new().eq("type", "cook").eq("isAvailable", true);
        assert!(f.matches(&json!({"type": "cook", "isAvailable": true, "name": "x"})));
        assert!(!f.matches(&json!({"type": "cook", "isAvailable": false})));
        assert!(!f.matches(&json!({"type": "customer", "isAvailable": true})));
        assert!(!f.matches(&json!({"isAvailable": true})));
    }

    #[test]
    fn filter_json_form_mirrors_fields() {
        let f = Filter::new().eq("email", "a@b.com");
        assert_eq!(f.as_json(), json!({"email": "a@b.com"}));
    }
}
