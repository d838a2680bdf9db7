//! HTTP request handlers.

pub mod attendance;
pub mod bookings;
pub mod career;
pub mod certifications;
pub mod collections;
pub mod health;
