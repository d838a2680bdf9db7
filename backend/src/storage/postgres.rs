//! PostgreSQL document store backed by a single JSONB table.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{
    duplicate, not_found, patch_fields, prepare_insert, DocumentStore, InsertAck, Mutation,
};
use crate::error::Result;
use crate::models::Collection;

/// Unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY created_at, seq",
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(body,)| body).collect())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let body: Option<Value> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.as_str())
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(body)
    }

    async fn insert(&self, collection: Collection, document: Value) -> Result<InsertAck> {
        let (id, document) = prepare_insert(document)?;

        let result = sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(&id)
            .bind(&document)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(InsertAck::new(id)),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(duplicate(collection, &id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn merge(&self, collection: Collection, id: &str, partial: Value) -> Result<Value> {
        let fields = Value::Object(patch_fields(partial)?);

        let body: Option<Value> = sqlx::query_scalar(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(&fields)
        .fetch_optional(&self.pool)
        .await?;

        body.ok_or_else(|| not_found(collection, id))
    }

    async fn modify(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Value> {
        let mut tx = self.pool.begin().await?;

        let current: Option<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut body = current.ok_or_else(|| not_found(collection, id))?;
        // Dropping the transaction on error rolls back and releases the row lock.
        mutation(&mut body)?;

        sqlx::query(
            "UPDATE documents SET body = $3, updated_at = NOW() WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(&body)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(body)
    }

    async fn clear(&self, collection: Collection) -> Result<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
