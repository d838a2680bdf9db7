//! Typed client layer for the VetPath REST API.
//!
//! Each view owns an explicit store instead of sharing global mutable state.
//! All network access goes through [`CollectionApi`], implemented over HTTP by
//! [`ApiClient`] and by in-process fakes in tests.

pub mod api_client;
pub mod attendance_roster;
pub mod booking_form;
pub mod certification_vault;
pub mod store;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::booking::{BookingAck, BookingRequest, FieldErrors, SlotAvailability};
use crate::models::certification::Certification;
use crate::models::Collection;
use crate::storage::InsertAck;

pub use api_client::ApiClient;
pub use attendance_roster::AttendanceRoster;
pub use booking_form::{BookingForm, FormStatus, SubmissionPolicy};
pub use certification_vault::{CertificationCard, CertificationVault};
pub use store::{LoadState, Record, ViewStore};

/// Errors surfaced to client views
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl ClientError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Remote operations the client views depend on.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    async fn list(&self, collection: Collection) -> ClientResult<Vec<Value>>;

    async fn create(&self, collection: Collection, document: Value) -> ClientResult<InsertAck>;

    async fn get(&self, collection: Collection, id: &str) -> ClientResult<Value>;

    async fn update(&self, collection: Collection, id: &str, partial: Value)
        -> ClientResult<Value>;

    async fn approve(&self, certification_id: &str, comment: Option<&str>)
        -> ClientResult<Certification>;

    async fn reject(&self, certification_id: &str, comment: Option<&str>)
        -> ClientResult<Certification>;

    async fn toggle(&self, attendance_id: &str) -> ClientResult<AttendanceRecord>;

    async fn mark(&self, attendance_id: &str, status: AttendanceStatus)
        -> ClientResult<AttendanceRecord>;

    async fn submit_booking(&self, request: &BookingRequest) -> ClientResult<BookingAck>;

    async fn availability(&self, mentor_id: &str, date: NaiveDate)
        -> ClientResult<Vec<SlotAvailability>>;
}
