//! Domain models for the documents the API serves.

pub mod attendance;
pub mod booking;
pub mod career;
pub mod catalog;
pub mod certification;
pub mod collection;
pub mod program;
pub mod user;

pub use collection::Collection;
pub use user::{Actor, UserRole};
