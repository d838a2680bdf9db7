//! Mentorship booking requests.

use chrono::{Duration, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::booking::{BookingAck, BookingRequest, BookingStatus};
use crate::models::Collection;
use crate::services::availability::AvailabilityProvider;
use crate::storage::DocumentStore;

/// Earliest calendar date still current somewhere (UTC-12).
///
/// Requests arrive from any timezone, so "today" for the past-date rule is
/// the most lenient one.
pub fn earliest_today() -> NaiveDate {
    (Utc::now() - Duration::hours(12)).date_naive()
}

pub struct BookingService {
    store: Arc<dyn DocumentStore>,
    availability: Arc<dyn AvailabilityProvider>,
    // Serialises the availability check and the insert.
    slot_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(store: Arc<dyn DocumentStore>, availability: Arc<dyn AvailabilityProvider>) -> Self {
        Self {
            store,
            availability,
            slot_lock: Mutex::new(()),
        }
    }

    pub async fn submit(&self, request: BookingRequest, today: NaiveDate) -> Result<BookingAck> {
        request
            .validate(today)
            .map_err(|errors| AppError::Validation(errors.to_string()))?;

        let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d")
            .map_err(|e| AppError::Validation(format!("invalid date: {e}")))?;
        let day = date.format("%Y-%m-%d").to_string();
        let time = request.time.trim().to_string();

        let _guard = self.slot_lock.lock().await;

        if !self
            .availability
            .is_available(&request.mentor_id, date, &time)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "{day} {time} is already booked for this mentor"
            )));
        }

        let id = Uuid::new_v4().to_string();
        let mut document = serde_json::to_value(&request)?;
        if let Value::Object(fields) = &mut document {
            fields.insert("id".into(), Value::String(id.clone()));
            fields.insert("date".into(), Value::String(day.clone()));
            fields.insert("time".into(), Value::String(time.clone()));
            fields.insert("status".into(), serde_json::to_value(BookingStatus::Requested)?);
            fields.insert(
                "createdAt".into(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        self.store.insert(Collection::Bookings, document).await?;

        info!(
            booking_id = %id,
            mentor_id = %request.mentor_id,
            date = %day,
            time = %time,
            duration = request.duration,
            "Session requested"
        );

        Ok(BookingAck {
            id,
            status: BookingStatus::Requested,
        })
    }
}
