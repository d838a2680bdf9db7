//! Common test utilities for backend integration tests
//!
//! This module provides shared infrastructure for testing:
//! - In-memory application state and router
//! - Request helpers carrying identity headers
//! - A real server on an ephemeral port for client tests

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use vetpath_backend::api::middleware::identity::{
    USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER,
};
use vetpath_backend::api::{routes::create_router, AppState, SharedState};
use vetpath_backend::cli::seed_store;
use vetpath_backend::config::Config;
use vetpath_backend::models::Actor;
use vetpath_backend::storage::{DocumentStore, MemoryDocumentStore};

/// Test context over an in-memory store
pub struct TestContext {
    pub store: Arc<MemoryDocumentStore>,
    pub state: SharedState,
}

impl TestContext {
    /// Empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = Arc::new(AppState::new(Config::for_memory(), store.clone()));
        Self { store, state }
    }

    /// Store loaded with the seed dataset
    pub async fn seeded() -> Self {
        let ctx = Self::new();
        seed_store(ctx.store.as_ref(), false)
            .await
            .expect("seeding the memory store should succeed");
        ctx
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Send one request through a fresh router and decode the JSON body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, actor: Option<&Actor>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, actor, None)).await
    }

    pub async fn post(&self, uri: &str, actor: Option<&Actor>, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, actor, Some(body))).await
    }

    pub async fn put(&self, uri: &str, actor: Option<&Actor>, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::PUT, uri, actor, Some(body))).await
    }

    /// Serve the router on an ephemeral port and return its base URL.
    pub async fn spawn_server(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.router();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        format!("http://{}", addr)
    }
}

/// Build a request with optional identity headers and JSON body.
pub fn request(method: Method, uri: &str, actor: Option<&Actor>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder
            .header(USER_ID_HEADER, actor.id.as_str())
            .header(USER_NAME_HEADER, actor.name.as_str())
            .header(USER_ROLE_HEADER, actor.role.as_str());
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
