//! Application configuration loaded from environment variables.
//!
//! Every setting has a local-development default so `cargo run` works against a
//! stock Postgres on localhost.

use crate::error::{AppError, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/vetpath";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Where documents live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Postgres,
    Memory,
}

impl StorageBackendKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Config(format!(
                "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

/// Allowed cross-origin callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            return Self::Any;
        }
        Self::List(
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server bind address (host:port)
    pub bind_address: String,

    /// Allowed CORS origins
    pub cors_origins: CorsOrigins,

    /// Document store implementation
    pub storage_backend: StorageBackendKind,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    /// "text" or "json"
    pub log_format: String,

    /// Generative-language API key; career tools degrade when unset
    pub gemini_api_key: Option<String>,

    /// Generative-language API base URL
    pub gemini_base_url: String,

    /// Model used by translator, refiner and interview coach
    pub gemini_model: String,

    /// Model used by the general assistant
    pub gemini_assistant_model: String,

    /// Timeout for outbound HTTP calls
    pub http_timeout_secs: u64,
}

redacted_debug!(Config {
    show database_url,
    show bind_address,
    show cors_origins,
    show storage_backend,
    show log_level,
    show log_format,
    redact_option gemini_api_key,
    show gemini_base_url,
    show gemini_model,
    show gemini_assistant_model,
    show http_timeout_secs,
});

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = match lookup("PORT") {
                    Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                        AppError::Config(format!("PORT must be a port number: {e}"))
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => StorageBackendKind::parse(&raw)?,
            None => StorageBackendKind::Postgres,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_address,
            cors_origins: CorsOrigins::parse(
                &lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into()),
            ),
            storage_backend,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "text".into()),
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| "gemini-3-flash-preview".into()),
            gemini_assistant_model: lookup("GEMINI_ASSISTANT_MODEL")
                .unwrap_or_else(|| "gemini-3-pro-preview".into()),
            http_timeout_secs: lookup("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }

    /// In-memory configuration for tests and local tooling.
    pub fn for_memory() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_address: format!("127.0.0.1:{DEFAULT_PORT}"),
            cors_origins: CorsOrigins::parse(DEFAULT_CORS_ORIGINS),
            storage_backend: StorageBackendKind::Memory,
            log_level: "info".into(),
            log_format: "text".into(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.into(),
            gemini_model: "gemini-3-flash-preview".into(),
            gemini_assistant_model: "gemini-3-pro-preview".into(),
            http_timeout_secs: 30,
        }
    }
}
