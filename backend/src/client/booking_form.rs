//! Mentorship booking form: field state, slot loading and submission.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{ClientError, ClientResult, CollectionApi};
use crate::models::booking::{
    BookingAck, BookingRequest, FieldErrors, SlotAvailability, DEFAULT_DURATION, DEFAULT_TIMEZONE,
};

/// How long a success message stays before the form clears.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

/// What a server failure means for the person booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPolicy {
    /// Report success once validation passes; server failures are only logged.
    #[default]
    Optimistic,
    /// Report server failures as [`FormStatus::Error`].
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Caller's IANA zone: `TZ` when set, else the host zone, else UTC.
pub fn local_timezone() -> String {
    let host = iana_time_zone::get_timezone()
        .map_err(|e| debug!(error = %e, "Host timezone unavailable"))
        .ok();
    resolve_timezone(std::env::var("TZ").ok(), host)
}

fn resolve_timezone(tz_override: Option<String>, host: Option<String>) -> String {
    [tz_override, host]
        .into_iter()
        .flatten()
        .map(|tz| tz.trim().trim_start_matches(':').to_string())
        .find(|tz| !tz.is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
}

/// Calendar day on the caller's clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct BookingForm {
    api: Arc<dyn CollectionApi>,
    policy: SubmissionPolicy,
    reset_delay: Duration,
    mentor_id: String,
    mentor_name: String,
    user_id: String,
    date: String,
    time: String,
    duration: u16,
    timezone: String,
    message: String,
    errors: FieldErrors,
    slots: Vec<SlotAvailability>,
    status: FormStatus,
    last_ack: Option<BookingAck>,
}

impl BookingForm {
    pub fn new(
        api: Arc<dyn CollectionApi>,
        mentor_id: impl Into<String>,
        mentor_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            policy: SubmissionPolicy::default(),
            reset_delay: RESET_DELAY,
            mentor_id: mentor_id.into(),
            mentor_name: mentor_name.into(),
            user_id: user_id.into(),
            date: String::new(),
            time: String::new(),
            duration: DEFAULT_DURATION,
            timezone: local_timezone(),
            message: String::new(),
            errors: FieldErrors::new(),
            slots: Vec::new(),
            status: FormStatus::Idle,
            last_ack: None,
        }
    }

    pub fn with_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_ack(&self) -> Option<&BookingAck> {
        self.last_ack.as_ref()
    }

    /// Picking a new date drops the chosen slot and the loaded availability.
    pub fn set_date(&mut self, date: impl Into<String>) {
        let date = date.into();
        if date != self.date {
            self.time.clear();
            self.slots.clear();
        }
        self.date = date;
        self.errors = FieldErrors::new();
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    pub fn set_duration(&mut self, minutes: u16) {
        self.duration = minutes;
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn request(&self) -> BookingRequest {
        let message = self.message.trim();
        BookingRequest {
            mentor_id: self.mentor_id.clone(),
            mentor_name: self.mentor_name.clone(),
            user_id: self.user_id.clone(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            duration: self.duration,
            timezone: self.timezone.clone(),
            message: (!message.is_empty()).then(|| message.to_string()),
        }
    }

    /// Validate the fields against `today`, keeping the errors for display.
    pub fn validate(&mut self, today: NaiveDate) -> bool {
        self.errors = match self.request().validate(today) {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        self.errors.is_empty()
    }

    pub fn slots(&self) -> &[SlotAvailability] {
        &self.slots
    }

    pub fn available_slots(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.available)
            .map(|s| s.time.as_str())
            .collect()
    }

    /// Load availability for the chosen date. Without a valid date there is
    /// nothing to load.
    pub async fn load_slots(&mut self) -> ClientResult<&[SlotAvailability]> {
        let Ok(date) = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") else {
            self.slots.clear();
            return Ok(&self.slots);
        };
        self.slots = self.api.availability(&self.mentor_id, date).await?;
        if !self.time.is_empty() && !self.available_slots().contains(&self.time.as_str()) {
            self.time.clear();
        }
        Ok(&self.slots)
    }

    /// Validate and send the request.
    ///
    /// Invalid fields stop submission and return `Validation`. A server failure
    /// is returned as an error under [`SubmissionPolicy::Strict`] and only
    /// logged under [`SubmissionPolicy::Optimistic`].
    pub async fn submit(&mut self, today: NaiveDate) -> ClientResult<&FormStatus> {
        if !self.validate(today) {
            self.status = FormStatus::Idle;
            return Err(ClientError::Validation(self.errors.clone()));
        }

        self.status = FormStatus::Loading;
        self.last_ack = None;
        let request = self.request();

        match self.api.submit_booking(&request).await {
            Ok(ack) => {
                info!(
                    booking_id = %ack.id,
                    mentor_id = %request.mentor_id,
                    date = %request.date,
                    time = %request.time,
                    "Booking requested"
                );
                self.last_ack = Some(ack);
                self.status = FormStatus::Success;
            }
            Err(e) => match self.policy {
                SubmissionPolicy::Optimistic => {
                    warn!(mentor_id = %request.mentor_id, error = %e, "Booking request failed; reporting success");
                    self.status = FormStatus::Success;
                }
                SubmissionPolicy::Strict => {
                    warn!(mentor_id = %request.mentor_id, error = %e, "Booking request failed");
                    self.status = FormStatus::Error(e.to_string());
                    return Err(e);
                }
            },
        }
        Ok(&self.status)
    }

    /// After a success, wait out the confirmation and clear the
    /// date, time and message. Other statuses return immediately.
    pub async fn reset_after_success(&mut self) {
        if self.status != FormStatus::Success {
            return;
        }
        tokio::time::sleep(self.reset_delay).await;
        self.date.clear();
        self.time.clear();
        self.message.clear();
        self.slots.clear();
        self.status = FormStatus::Idle;
    }
}
