//! Mentorship session booking requests and slot rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Hours that start a bookable half-hour pair. 12:00 is the lunch break.
const SLOT_HOURS: [u32; 8] = [9, 10, 11, 13, 14, 15, 16, 17];

pub const ALLOWED_DURATIONS: [u16; 3] = [15, 30, 45];
pub const DEFAULT_DURATION: u16 = 30;
pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const MSG_DATE_REQUIRED: &str = "Please select a date";
pub const MSG_DATE_INVALID: &str = "Please select a valid date";
pub const MSG_DATE_PAST: &str = "Cannot select a past date";
pub const MSG_TIME_REQUIRED: &str = "Please select a time slot";
pub const MSG_TIME_INVALID: &str = "Please select a valid time slot";
pub const MSG_DURATION_INVALID: &str = "Please choose a 15, 30 or 45 minute session";
pub const MSG_MENTOR_REQUIRED: &str = "Please select a mentor";

/// Every bookable start time, `HH:MM`, in chronological order.
pub fn candidate_slots() -> Vec<String> {
    SLOT_HOURS
        .iter()
        .flat_map(|h| [format!("{h:02}:00"), format!("{h:02}:30")])
        .collect()
}

pub fn is_candidate_slot(time: &str) -> bool {
    candidate_slots().iter().any(|slot| slot == time)
}

/// Field name to message; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A request for a mentorship session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub mentor_id: String,
    #[serde(default)]
    pub mentor_name: String,
    #[serde(default)]
    pub user_id: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Slot start, `HH:MM`.
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_duration")]
    pub duration: u16,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_duration() -> u16 {
    DEFAULT_DURATION
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl BookingRequest {
    /// Check the request against the slot rules for `today`.
    ///
    /// Date and time errors are independent, so both can be reported at once.
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.mentor_id.trim().is_empty() {
            errors.insert("mentorId", MSG_MENTOR_REQUIRED);
        }

        let date = self.date.trim();
        if date.is_empty() {
            errors.insert("date", MSG_DATE_REQUIRED);
        } else {
            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(day) if day < today => errors.insert("date", MSG_DATE_PAST),
                Ok(_) => {}
                Err(_) => errors.insert("date", MSG_DATE_INVALID),
            }
        }

        let time = self.time.trim();
        if time.is_empty() {
            errors.insert("time", MSG_TIME_REQUIRED);
        } else if !is_candidate_slot(time) {
            errors.insert("time", MSG_TIME_INVALID);
        }

        if !ALLOWED_DURATIONS.contains(&self.duration) {
            errors.insert("duration", MSG_DURATION_INVALID);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Requested,
}

/// Server acknowledgement of a stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingAck {
    pub id: String,
    pub status: BookingStatus,
}

/// One candidate slot and whether it can still be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SlotAvailability {
    pub time: String,
    pub available: bool,
}
