//! Generic collection handlers.
//!
//! One router per collection; the collection itself travels as an
//! `Extension<Collection>` so the same handlers serve every slug.

use axum::{
    extract::{Extension, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use utoipa::OpenApi;

use crate::api::SharedState;
use crate::error::Result;
use crate::models::Collection;
use crate::storage::InsertAck;

pub fn router(collection: Collection) -> Router<SharedState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route("/:id", get(get_document).put(update_document))
        .layer(Extension(collection))
}

/// List every document in a collection
#[utoipa::path(
    get,
    path = "/api/{collection}",
    tag = "collections",
    params(("collection" = String, Path, description = "Collection slug, e.g. courses or forum-posts")),
    responses(
        (status = 200, description = "Documents in insertion order", body = [Object]),
    )
)]
pub async fn list_documents(
    State(state): State<SharedState>,
    Extension(collection): Extension<Collection>,
) -> Result<Json<Vec<Value>>> {
    let docs = state.collection_service().list(collection).await?;
    Ok(Json(docs))
}

/// Insert a document
#[utoipa::path(
    post,
    path = "/api/{collection}",
    tag = "collections",
    params(("collection" = String, Path, description = "Collection slug")),
    request_body = Object,
    responses(
        (status = 200, description = "Document stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Duplicate id", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn create_document(
    State(state): State<SharedState>,
    Extension(collection): Extension<Collection>,
    Json(body): Json<Value>,
) -> Result<Json<InsertAck>> {
    let ack = state.collection_service().create(collection, body).await?;
    Ok(Json(ack))
}

/// Fetch one document by id
#[utoipa::path(
    get,
    path = "/api/{collection}/{id}",
    tag = "collections",
    params(
        ("collection" = String, Path, description = "Collection slug"),
        ("id" = String, Path, description = "Document id"),
    ),
    responses(
        (status = 200, description = "The document", body = Object),
        (status = 404, description = "No such document", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn get_document(
    State(state): State<SharedState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let doc = state.collection_service().get(collection, &id).await?;
    Ok(Json(doc))
}

/// Shallow-merge fields into a document
#[utoipa::path(
    put,
    path = "/api/{collection}/{id}",
    tag = "collections",
    params(
        ("collection" = String, Path, description = "Collection slug"),
        ("id" = String, Path, description = "Document id"),
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Merged document", body = Object),
        (status = 404, description = "No such document", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn update_document(
    State(state): State<SharedState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let doc = state
        .collection_service()
        .update(collection, &id, body)
        .await?;
    Ok(Json(doc))
}

#[derive(OpenApi)]
#[openapi(
    paths(list_documents, create_document, get_document, update_document),
    components(schemas(InsertAck))
)]
pub struct CollectionsApiDoc;
