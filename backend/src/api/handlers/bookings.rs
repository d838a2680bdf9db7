//! Mentorship booking and slot availability handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use utoipa::OpenApi;

use crate::api::dto::DateQuery;
use crate::api::handlers::collections;
use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::booking::{BookingAck, BookingRequest, BookingStatus, SlotAvailability};
use crate::models::Collection;
use crate::services::booking_service::earliest_today;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(collections::list_documents).post(create_booking))
        .route("/:id", get(collections::get_document).put(collections::update_document))
        .layer(Extension(Collection::Bookings))
}

/// Mentor routes: the generic collection plus slot availability.
pub fn mentors_router() -> Router<SharedState> {
    collections::router(Collection::Mentors).route("/:id/availability", get(mentor_availability))
}

/// Request a mentorship session
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/bookings",
    tag = "bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking stored as requested", body = BookingAck),
        (status = 400, description = "Date, time or duration invalid", body = crate::api::openapi::ErrorResponse),
        (status = 409, description = "Slot already booked", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn create_booking(
    State(state): State<SharedState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingAck>> {
    let ack = state.bookings.submit(request, earliest_today()).await?;
    Ok(Json(ack))
}

/// Candidate slots for a mentor on a date
#[utoipa::path(
    get,
    path = "/{id}/availability",
    context_path = "/api/mentors",
    tag = "bookings",
    params(("id" = String, Path, description = "Mentor id"), DateQuery),
    responses(
        (status = 200, description = "All 16 candidate slots with availability", body = [SlotAvailability]),
        (status = 400, description = "Missing or malformed date", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn mentor_availability(
    State(state): State<SharedState>,
    Path(mentor_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<SlotAvailability>>> {
    let raw = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::Validation("date query parameter is required".to_string()))?;
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))?;

    let slots = state.availability.slots(&mentor_id, date).await?;
    Ok(Json(slots))
}

#[derive(OpenApi)]
#[openapi(
    paths(create_booking, mentor_availability),
    components(schemas(BookingRequest, BookingAck, BookingStatus, SlotAvailability))
)]
pub struct BookingsApiDoc;
