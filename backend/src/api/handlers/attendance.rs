//! Attendance roster handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use utoipa::OpenApi;

use crate::api::dto::DateQuery;
use crate::api::handlers::collections;
use crate::api::SharedState;
use crate::error::Result;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::models::Collection;
use crate::storage::InsertAck;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/",
            get(collections::list_documents).post(create_attendance),
        )
        .route("/summary", get(attendance_summary))
        .route(
            "/:id",
            get(collections::get_document).put(update_attendance),
        )
        .route("/:id/toggle", post(toggle_attendance))
        .layer(Extension(Collection::Attendance))
}

/// Present/absent/late counts and attendance rate
#[utoipa::path(
    get,
    path = "/summary",
    context_path = "/api/attendance",
    tag = "attendance",
    params(DateQuery),
    responses(
        (status = 200, description = "Roster statistics", body = AttendanceSummary),
    )
)]
pub async fn attendance_summary(
    State(state): State<SharedState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<AttendanceSummary>> {
    let date = query.date.as_deref().filter(|d| !d.trim().is_empty());
    let summary = state.attendance_service().summary(date).await?;
    Ok(Json(summary))
}

/// Add a roster record
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/attendance",
    tag = "attendance",
    request_body = AttendanceRecord,
    responses(
        (status = 200, description = "Record stored", body = InsertAck),
        (status = 400, description = "Missing or invalid fields", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Duplicate id", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn create_attendance(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<Json<InsertAck>> {
    let ack = state.attendance_service().create(body).await?;
    Ok(Json(ack))
}

/// Flip a record between present and absent
#[utoipa::path(
    post,
    path = "/{id}/toggle",
    context_path = "/api/attendance",
    tag = "attendance",
    params(("id" = String, Path, description = "Attendance record id")),
    responses(
        (status = 200, description = "Record with its new status", body = AttendanceRecord),
        (status = 404, description = "Not found", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn toggle_attendance(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<AttendanceRecord>> {
    let record = state.attendance_service().toggle(&id).await?;
    Ok(Json(record))
}

/// Update a record; `status` must be present, absent or late
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/attendance",
    tag = "attendance",
    params(("id" = String, Path, description = "Attendance record id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated record", body = AttendanceRecord),
        (status = 400, description = "Invalid status", body = crate::api::openapi::ErrorResponse),
        (status = 404, description = "Not found", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn update_attendance(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<AttendanceRecord>> {
    let record = state.attendance_service().update(&id, body).await?;
    Ok(Json(record))
}

#[derive(OpenApi)]
#[openapi(
    paths(attendance_summary, create_attendance, toggle_attendance, update_attendance),
    components(schemas(AttendanceRecord, AttendanceStatus, AttendanceSummary))
)]
pub struct AttendanceApiDoc;
