//! Business logic services.

pub mod attendance_service;
pub mod availability;
pub mod booking_service;
pub mod career_service;
pub mod certification_service;
pub mod collection_service;
pub mod completion_service;
