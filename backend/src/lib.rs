//! VetPath - Backend Library
//!
//! REST backend for a veteran learning platform: generic record collections,
//! certification review with an audit trail, attendance, mentorship bookings
//! and AI-assisted career tools, plus the typed client layer that consumes it.

#[macro_use]
mod macros;

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, Result};
