//! Collection service.
//!
//! Generic list/get/create/update over any named collection.

use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Collection;
use crate::storage::{DocumentStore, InsertAck};

/// Collection service
pub struct CollectionService {
    store: Arc<dyn DocumentStore>,
}

impl CollectionService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every document in insertion order
    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        self.store.list(collection).await
    }

    pub async fn get(&self, collection: Collection, id: &str) -> Result<Value> {
        self.store.get(collection, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} '{}' not found", collection.as_str(), id))
        })
    }

    pub async fn create(&self, collection: Collection, document: Value) -> Result<InsertAck> {
        let ack = self.store.insert(collection, document).await?;
        tracing::info!(
            collection = %collection,
            id = %ack.inserted_id,
            "Document created"
        );
        Ok(ack)
    }

    /// Shallow merge; last write wins
    pub async fn update(&self, collection: Collection, id: &str, partial: Value) -> Result<Value> {
        let merged = self.store.merge(collection, id, partial).await?;
        tracing::debug!(collection = %collection, id = %id, "Document updated");
        Ok(merged)
    }
}
