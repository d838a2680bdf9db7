//! Document storage backends.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Collection;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

/// Acknowledgement returned by an insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.into(),
        }
    }
}

/// In-place edit applied by [`DocumentStore::modify`]. Returning an error
/// leaves the stored document untouched.
pub type Mutation<'a> = &'a (dyn Fn(&mut Value) -> Result<()> + Send + Sync);

/// Storage backend trait
///
/// Documents are JSON objects carrying a string `id`, unique per collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection in insertion order
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;

    /// One document, or `None`
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Store a new document. A non-empty string `id` is kept, otherwise one
    /// is assigned. Duplicate ids are a `Conflict`.
    async fn insert(&self, collection: Collection, document: Value) -> Result<InsertAck>;

    /// Shallow-merge `partial` into the stored document and return the result.
    /// Last write wins.
    async fn merge(&self, collection: Collection, id: &str, partial: Value) -> Result<Value>;

    /// Atomic read-modify-write of one document.
    async fn modify(&self, collection: Collection, id: &str, mutation: Mutation<'_>)
        -> Result<Value>;

    /// Remove every document of a collection, returning how many were removed
    async fn clear(&self, collection: Collection) -> Result<u64>;

    /// Check the backend is reachable
    async fn ping(&self) -> Result<()>;
}

/// Validate a new document and settle its id.
pub(crate) fn prepare_insert(document: Value) -> Result<(String, Value)> {
    let Value::Object(mut fields) = document else {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => Uuid::new_v4().to_string(),
    };
    fields.insert("id".to_string(), Value::String(id.clone()));

    Ok((id, Value::Object(fields)))
}

/// Partial update fields, without `id`.
pub(crate) fn patch_fields(partial: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut fields) = partial else {
        return Err(AppError::Validation(
            "update body must be a JSON object".to_string(),
        ));
    };
    fields.remove("id");
    Ok(fields)
}

/// Top-level merge; nested objects are replaced, not merged.
pub(crate) fn merge_shallow(target: &mut Value, fields: Map<String, Value>) {
    if let Value::Object(existing) = target {
        for (key, value) in fields {
            existing.insert(key, value);
        }
    }
}

pub(crate) fn not_found(collection: Collection, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", collection.as_str(), id))
}

pub(crate) fn duplicate(collection: Collection, id: &str) -> AppError {
    AppError::Conflict(format!(
        "{} '{}' already exists",
        collection.as_str(),
        id
    ))
}
