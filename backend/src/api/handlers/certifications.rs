//! Certification review workflow handlers.
//!
//! Veterans upload or plan certifications; reviewers (teacher role) approve,
//! reject or expire them. The caller identity comes from the `X-User-*`
//! headers.

use axum::{
    extract::{Extension, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use utoipa::OpenApi;

use crate::api::dto::ReviewNote;
use crate::api::middleware::identity::require_actor;
use crate::api::SharedState;
use crate::error::Result;
use crate::models::certification::{AuditEntry, Certification, CertificationStatus};
use crate::models::{Actor, Collection};
use crate::storage::InsertAck;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_certifications).post(submit_certification))
        .route(
            "/:id",
            get(get_certification).put(update_certification),
        )
        .route("/:id/approve", post(approve_certification))
        .route("/:id/reject", post(reject_certification))
        .route("/:id/expire", post(expire_certification))
        .layer(Extension(Collection::Certifications))
}

/// Optional body for workflow actions; an empty body means no comment.
fn comment_of(body: Option<Json<ReviewNote>>) -> Option<String> {
    body.and_then(|Json(note)| note.comment)
}

/// List certifications visible to the caller
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/certifications",
    tag = "certifications",
    responses(
        (status = 200, description = "All for reviewers and anonymous callers, own records otherwise", body = [Certification]),
    )
)]
pub async fn list_certifications(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
) -> Result<Json<Vec<Value>>> {
    let docs = state
        .certification_service()
        .list_visible(actor.as_ref())
        .await?;
    Ok(Json(docs))
}

/// Upload or plan a certification
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/certifications",
    tag = "certifications",
    request_body = Certification,
    responses(
        (status = 200, description = "Stored", body = InsertAck),
        (status = 400, description = "Invalid body or initial status", body = crate::api::openapi::ErrorResponse),
        (status = 403, description = "Reviewers cannot submit", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn submit_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Json(body): Json<Value>,
) -> Result<Json<InsertAck>> {
    let ack = state
        .certification_service()
        .submit(body, actor.as_ref())
        .await?;
    Ok(Json(ack))
}

/// Fetch one certification the caller may see
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/certifications",
    tag = "certifications",
    params(("id" = String, Path, description = "Certification id")),
    responses(
        (status = 200, description = "The certification", body = Certification),
        (status = 404, description = "Not found or not visible to the caller", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn get_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let doc = state
        .certification_service()
        .get_visible(&id, actor.as_ref())
        .await?;
    Ok(Json(doc))
}

/// Update a certification; status changes follow the review rules
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/certifications",
    tag = "certifications",
    params(("id" = String, Path, description = "Certification id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated certification", body = Certification),
        (status = 400, description = "auditTrail or owner supplied, or invalid status", body = crate::api::openapi::ErrorResponse),
        (status = 401, description = "Status change or reviewed-detail edit without identity", body = crate::api::openapi::ErrorResponse),
        (status = 403, description = "Not owner or reviewer, or reviewed details edited by a non-reviewer", body = crate::api::openapi::ErrorResponse),
        (status = 404, description = "Not found", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Transition not allowed", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn update_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let doc = state
        .certification_service()
        .update(&id, body, actor.as_ref())
        .await?;
    Ok(Json(doc))
}

/// Approve a pending certification
#[utoipa::path(
    post,
    path = "/{id}/approve",
    context_path = "/api/certifications",
    tag = "certifications",
    params(("id" = String, Path, description = "Certification id")),
    request_body(content = ReviewNote, description = "Optional reviewer comment"),
    responses(
        (status = 200, description = "Now completed", body = Certification),
        (status = 401, description = "No identity", body = crate::api::openapi::ErrorResponse),
        (status = 403, description = "Caller is not a reviewer", body = crate::api::openapi::ErrorResponse),
        (status = 404, description = "Not found", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Not pending review", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn approve_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewNote>>,
) -> Result<Json<Value>> {
    let actor = require_actor(actor)?;
    let doc = state
        .certification_service()
        .approve(&id, &actor, comment_of(body))
        .await?;
    Ok(Json(doc))
}

/// Reject a pending certification
#[utoipa::path(
    post,
    path = "/{id}/reject",
    context_path = "/api/certifications",
    tag = "certifications",
    params(("id" = String, Path, description = "Certification id")),
    request_body(content = ReviewNote, description = "Optional reviewer comment"),
    responses(
        (status = 200, description = "Now rejected", body = Certification),
        (status = 403, description = "Caller is not a reviewer", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Not pending review", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn reject_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewNote>>,
) -> Result<Json<Value>> {
    let actor = require_actor(actor)?;
    let doc = state
        .certification_service()
        .reject(&id, &actor, comment_of(body))
        .await?;
    Ok(Json(doc))
}

/// Mark a completed certification as lapsed
#[utoipa::path(
    post,
    path = "/{id}/expire",
    context_path = "/api/certifications",
    tag = "certifications",
    params(("id" = String, Path, description = "Certification id")),
    request_body(content = ReviewNote, description = "Optional reviewer comment"),
    responses(
        (status = 200, description = "Now expired", body = Certification),
        (status = 403, description = "Caller is not a reviewer", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Not completed", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn expire_certification(
    State(state): State<SharedState>,
    Extension(actor): Extension<Option<Actor>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewNote>>,
) -> Result<Json<Value>> {
    let actor = require_actor(actor)?;
    let doc = state
        .certification_service()
        .expire(&id, &actor, comment_of(body))
        .await?;
    Ok(Json(doc))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_certifications,
        submit_certification,
        get_certification,
        update_certification,
        approve_certification,
        reject_certification,
        expire_certification,
    ),
    components(schemas(Certification, CertificationStatus, AuditEntry, ReviewNote))
)]
pub struct CertificationsApiDoc;
