//! In-process document store for local runs and tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{
    duplicate, merge_shallow, not_found, patch_fields, prepare_insert, DocumentStore, InsertAck,
    Mutation,
};
use crate::error::Result;
use crate::models::Collection;

/// Document store held in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position(docs: &[Value], id: &str) -> Option<usize> {
    docs.iter()
        .position(|doc| doc.get("id").and_then(Value::as_str) == Some(id))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| position(docs, id).map(|i| docs[i].clone())))
    }

    async fn insert(&self, collection: Collection, document: Value) -> Result<InsertAck> {
        let (id, document) = prepare_insert(document)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if position(docs, &id).is_some() {
            return Err(duplicate(collection, &id));
        }
        docs.push(document);
        Ok(InsertAck::new(id))
    }

    async fn merge(&self, collection: Collection, id: &str, partial: Value) -> Result<Value> {
        let fields = patch_fields(partial)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        let index = position(docs, id).ok_or_else(|| not_found(collection, id))?;
        merge_shallow(&mut docs[index], fields);
        Ok(docs[index].clone())
    }

    async fn modify(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Value> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        let index = position(docs, id).ok_or_else(|| not_found(collection, id))?;

        let mut updated = docs[index].clone();
        mutation(&mut updated)?;
        docs[index] = updated.clone();
        Ok(updated)
    }

    async fn clear(&self, collection: Collection) -> Result<u64> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .remove(&collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
