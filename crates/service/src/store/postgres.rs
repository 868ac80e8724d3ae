//! Durable backend: one JSONB row per entity in the `documents` table.
//!
//! Filters compile to jsonb containment (`@>`), which is field equality for
//! the top-level scalar filters this crate issues. Identity generation is the
//! database's own (`gen_random_uuid()`), embedded into the stored document in
//! the same statement. Concurrency control is delegated to Postgres.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use serde_json::{json, Value};

use super::{DocumentStore, Filter};
use crate::errors::ServiceError;

pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn stmt(sql: &str, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    fn db_err(e: sea_orm::DbErr) -> ServiceError {
        ServiceError::Db(e.to_string())
    }

    fn require_object(doc: &Value) -> Result<(), ServiceError> {
        if doc.is_object() {
            Ok(())
        } else {
            Err(ServiceError::Validation("document must be a JSON object".into()))
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, ServiceError> {
        let rows = self
            .db
            .query_all(Self::stmt(
                "SELECT doc || jsonb_build_object('id', id) AS doc \
                 FROM documents WHERE collection = $1 AND doc @> $2 ORDER BY seq",
                vec![collection.into(), filter.as_json().into()],
            ))
            .await
            .map_err(Self::db_err)?;
        rows.iter()
            .map(|row| row.try_get::<Value>("", "doc").map_err(Self::db_err))
            .collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Value>, ServiceError> {
        let row = self
            .db
            .query_one(Self::stmt(
                "SELECT doc || jsonb_build_object('id', id) AS doc \
                 FROM documents WHERE collection = $1 AND doc @> $2 ORDER BY seq LIMIT 1",
                vec![collection.into(), filter.as_json().into()],
            ))
            .await
            .map_err(Self::db_err)?;
        row.map(|r| r.try_get::<Value>("", "doc").map_err(Self::db_err)).transpose()
    }

    async fn insert(&self, collection: &str, mut doc: Value) -> Result<Value, ServiceError> {
        Self::require_object(&doc)?;
        let explicit_id = doc.get("id").and_then(Value::as_str).map(str::to_owned);
        let id = match explicit_id {
            Some(id) => {
                self.db
                    .execute(Self::stmt(
                        "INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)",
                        vec![collection.into(), id.clone().into(), doc.clone().into()],
                    ))
                    .await
                    .map_err(Self::db_err)?;
                id
            }
            None => {
                // Native identity generation, embedded into the stored
                // document in the same statement.
                let row = self
                    .db
                    .query_one(Self::stmt(
                        "WITH new_id AS (SELECT gen_random_uuid()::text AS id) \
                         INSERT INTO documents (collection, id, doc) \
                         SELECT $1, id, $2 || jsonb_build_object('id', id) FROM new_id \
                         RETURNING id",
                        vec![collection.into(), doc.clone().into()],
                    ))
                    .await
                    .map_err(Self::db_err)?
                    .ok_or_else(|| ServiceError::Db("insert returned no id".into()))?;
                row.try_get::<String>("", "id").map_err(Self::db_err)?
            }
        };
        doc["id"] = json!(id);
        Ok(doc)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError> {
        let row = self
            .db
            .query_one(Self::stmt(
                "SELECT COUNT(*) AS cnt FROM documents WHERE collection = $1 AND doc @> $2",
                vec![collection.into(), filter.as_json().into()],
            ))
            .await
            .map_err(Self::db_err)?
            .ok_or_else(|| ServiceError::Db("count returned no row".into()))?;
        let cnt: i64 = row.try_get("", "cnt").map_err(Self::db_err)?;
        Ok(cnt.max(0) as u64)
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, ServiceError> {
        let res = self
            .db
            .execute(Self::stmt(
                "DELETE FROM documents WHERE collection = $1 AND doc @> $2",
                vec![collection.into(), filter.as_json().into()],
            ))
            .await
            .map_err(Self::db_err)?;
        Ok(res.rows_affected())
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Value>) -> Result<(), ServiceError> {
        for doc in docs {
            self.insert(collection, doc).await?;
        }
        Ok(())
    }
}
