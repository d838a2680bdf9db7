//! Test fixtures and data factories for backend tests
//!
//! Identities match the seed dataset: u1/u2 are veterans, u3 a reviewer.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use vetpath_backend::models::booking::BookingRequest;
use vetpath_backend::models::{Actor, UserRole};

pub fn veteran() -> Actor {
    Actor::new("u1", "Alex Thompson", UserRole::Veteran)
}

pub fn other_veteran() -> Actor {
    Actor::new("u2", "Sarah Connor", UserRole::Veteran)
}

pub fn reviewer() -> Actor {
    Actor::new("u3", "Maj. Robert Sterling", UserRole::Teacher)
}

/// A new certification upload body.
pub fn certification_upload(name: &str) -> Value {
    json!({
        "name": name,
        "issuer": "CompTIA",
        "issueDate": "2025-02-01",
        "credentialId": "NET-PLUS-77",
        "evidenceUrl": "net_plus.pdf"
    })
}

/// A day comfortably in the future for any server clock.
pub fn future_date() -> NaiveDate {
    (Utc::now() + Duration::days(7)).date_naive()
}

pub fn booking(date: NaiveDate, time: &str) -> BookingRequest {
    BookingRequest {
        mentor_id: "m1".into(),
        mentor_name: "Sarah Johnson".into(),
        user_id: "u1".into(),
        date: date.format("%Y-%m-%d").to_string(),
        time: time.into(),
        duration: 30,
        timezone: "America/Chicago".into(),
        message: Some("Resume review please".into()),
    }
}

pub fn attendance_record(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "studentId": format!("s-{id}"),
        "studentName": format!("Student {id}"),
        "status": status,
        "date": "2024-01-27"
    })
}
