//! Document store for schema-less JSON records
//!
//! Records are grouped in named collections. Every record gets a
//! store-assigned identifier which is always handed out as a string.
//! Two backends share the [`DocumentStore`] trait: PostgreSQL, keeping
//! each record in a JSONB column, and an in-memory store used by tests and
//! local development.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};

/// A stored record and its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Map<String, Value>,
}

impl Document {
    /// Deserialize the body into a typed record
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> DatabaseResult<T> {
        Ok(serde_json::from_value(Value::Object(self.body.clone()))?)
    }
}

/// Persistence operations shared by all backends
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a JSON object and return its new identifier
    async fn insert_one(&self, collection: &str, body: Value) -> DatabaseResult<String>;

    /// Return the first document, in insertion order, containing every field of `filter`
    async fn find_one(&self, collection: &str, filter: Value) -> DatabaseResult<Option<Document>>;

    /// Return every document of a collection in insertion order
    async fn find_all(&self, collection: &str) -> DatabaseResult<Vec<Document>>;
}

fn into_object(value: Value, what: &str) -> DatabaseResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::InvalidDocument(format!(
            "{what} must be a JSON object, got {other}"
        ))),
    }
}

/// Document store backed by the `documents` table
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an initialized pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &sqlx::postgres::PgRow) -> DatabaseResult<Document> {
        let id: Uuid = row.try_get("id").map_err(DatabaseError::Query)?;
        let body: Value = row.try_get("body").map_err(DatabaseError::Query)?;

        Ok(Document {
            id: id.to_string(),
            body: into_object(body, "stored document")?,
        })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: &str, body: Value) -> DatabaseResult<String> {
        let body = Value::Object(into_object(body, "document")?);
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        debug!("Inserted document {} into {}", id, collection);
        Ok(id.to_string())
    }

    async fn find_one(&self, collection: &str, filter: Value) -> DatabaseResult<Option<Document>> {
        let filter = Value::Object(into_object(filter, "filter")?);

        let row = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(collection)
        .bind(&filter)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn find_all(&self, collection: &str) -> DatabaseResult<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(Self::row_to_document).collect()
    }
}

/// In-process document store
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().await;
        collections.get(collection).map_or(0, Vec::len)
    }
}

/// Containment with the same meaning as JSONB `@>` for objects and scalars
fn contains(body: &Value, filter: &Value) -> bool {
    match (body, filter) {
        (Value::Object(body), Value::Object(filter)) => filter
            .iter()
            .all(|(key, expected)| body.get(key).is_some_and(|actual| contains(actual, expected))),
        (Value::Array(body), Value::Array(filter)) => filter
            .iter()
            .all(|expected| body.iter().any(|actual| contains(actual, expected))),
        _ => body == filter,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, body: Value) -> DatabaseResult<String> {
        let body = into_object(body, "document")?;
        let id = Uuid::new_v4().to_string();

        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                body,
            });

        Ok(id)
    }

    async fn find_one(&self, collection: &str, filter: Value) -> DatabaseResult<Option<Document>> {
        let filter = Value::Object(into_object(filter, "filter")?);

        let collections = self.collections.lock().await;
        let found = collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| contains(&Value::Object(document.body.clone()), &filter))
                .cloned()
        });

        Ok(found)
    }

    async fn find_all(&self, collection: &str) -> DatabaseResult<Vec<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let store = MemoryDocumentStore::new();

        let id = store
            .insert_one("userInfo", json!({"email": "a@example.com", "gender": "f"}))
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let found = store
            .find_one("userInfo", json!({"email": "a@example.com"}))
            .await
            .unwrap()
            .expect("document should be found");
        assert_eq!(found.id, id);
        assert_eq!(found.body["gender"], "f");

        let missing = store
            .find_one("userInfo", json!({"email": "b@example.com"}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for name in ["first", "second", "third"] {
            store.insert_one("items", json!({"name": name})).await.unwrap();
        }
        store.insert_one("purchases", json!({"total": 1})).await.unwrap();

        let names: Vec<_> = store
            .find_all("items")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.body["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("first"), json!("second"), json!("third")]);
        assert_eq!(store.count("purchases").await, 1);
        assert!(store.find_all("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_non_object_documents() {
        let store = MemoryDocumentStore::new();

        let err = store.insert_one("items", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidDocument(_)));

        let err = store.find_one("items", json!("name")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidDocument(_)));
    }

    #[test]
    fn test_contains_matches_nested_fields() {
        let body = json!({"email": "a@b.co", "items": [{"name": "x", "quantity": 2}]});
        assert!(contains(&body, &json!({})));
        assert!(contains(&body, &json!({"items": [{"name": "x"}]})));
        assert!(!contains(&body, &json!({"items": [{"name": "y"}]})));
        assert!(!contains(&body, &json!({"email": "other@b.co"})));
    }

    #[test]
    fn test_document_decode() {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }

        let document = Document {
            id: "1".to_string(),
            body: into_object(json!({"name": "tea"}), "document").unwrap(),
        };
        let named: Named = document.decode().unwrap();
        assert_eq!(named.name, "tea");
    }
}
