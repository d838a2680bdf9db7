//! HTTP implementation of [`CollectionApi`] over reqwest.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{ClientError, ClientResult, CollectionApi};
use crate::api::middleware::identity::{USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::booking::{BookingAck, BookingRequest, SlotAvailability};
use crate::models::certification::Certification;
use crate::models::{Actor, Collection};
use crate::storage::InsertAck;

/// Error body produced by the server for any failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// VetPath REST API client
pub struct ApiClient {
    client: Client,
    base_url: String,
    identity: Option<Actor>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            identity: None,
        })
    }

    /// Send identity headers on every request.
    pub fn with_identity(mut self, actor: Actor) -> Self {
        self.identity = Some(actor);
        self
    }

    pub fn identity(&self) -> Option<&Actor> {
        self.identity.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.identity {
            Some(actor) => builder
                .header(USER_ID_HEADER, &actor.id)
                .header(USER_NAME_HEADER, &actor.name)
                .header(USER_ROLE_HEADER, actor.role.as_str()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    fn document_path(collection: Collection, id: &str) -> String {
        format!("/{}/{}", collection.slug(), id)
    }

    fn review_body(comment: Option<&str>) -> Value {
        match comment {
            Some(comment) => json!({ "comment": comment }),
            None => json!({}),
        }
    }
}

#[async_trait]
impl CollectionApi for ApiClient {
    async fn list(&self, collection: Collection) -> ClientResult<Vec<Value>> {
        let path = format!("/{}", collection.slug());
        self.send(self.request(Method::GET, &path)).await
    }

    async fn create(&self, collection: Collection, document: Value) -> ClientResult<InsertAck> {
        let path = format!("/{}", collection.slug());
        self.send(self.request(Method::POST, &path).json(&document))
            .await
    }

    async fn get(&self, collection: Collection, id: &str) -> ClientResult<Value> {
        let path = Self::document_path(collection, id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        partial: Value,
    ) -> ClientResult<Value> {
        let path = Self::document_path(collection, id);
        self.send(self.request(Method::PUT, &path).json(&partial))
            .await
    }

    async fn approve(
        &self,
        certification_id: &str,
        comment: Option<&str>,
    ) -> ClientResult<Certification> {
        let path = format!("/certifications/{certification_id}/approve");
        self.send(
            self.request(Method::POST, &path)
                .json(&Self::review_body(comment)),
        )
        .await
    }

    async fn reject(
        &self,
        certification_id: &str,
        comment: Option<&str>,
    ) -> ClientResult<Certification> {
        let path = format!("/certifications/{certification_id}/reject");
        self.send(
            self.request(Method::POST, &path)
                .json(&Self::review_body(comment)),
        )
        .await
    }

    async fn toggle(&self, attendance_id: &str) -> ClientResult<AttendanceRecord> {
        let path = format!("/attendance/{attendance_id}/toggle");
        self.send(self.request(Method::POST, &path)).await
    }

    async fn mark(
        &self,
        attendance_id: &str,
        status: AttendanceStatus,
    ) -> ClientResult<AttendanceRecord> {
        let path = format!("/attendance/{attendance_id}");
        self.send(
            self.request(Method::PUT, &path)
                .json(&json!({ "status": status })),
        )
        .await
    }

    async fn submit_booking(&self, request: &BookingRequest) -> ClientResult<BookingAck> {
        self.send(self.request(Method::POST, "/bookings").json(request))
            .await
    }

    async fn availability(
        &self,
        mentor_id: &str,
        date: NaiveDate,
    ) -> ClientResult<Vec<SlotAvailability>> {
        let path = format!("/mentors/{mentor_id}/availability");
        let date = date.format("%Y-%m-%d").to_string();
        self.send(self.request(Method::GET, &path).query(&[("date", date)]))
            .await
    }
}
