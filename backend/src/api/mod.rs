//! API module - HTTP handlers and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;

use crate::config::Config;
use crate::services::attendance_service::AttendanceService;
use crate::services::availability::{AvailabilityProvider, BookedSlotAvailability};
use crate::services::booking_service::BookingService;
use crate::services::career_service::CareerService;
use crate::services::certification_service::CertificationService;
use crate::services::collection_service::CollectionService;
use crate::storage::DocumentStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub availability: Arc<dyn AvailabilityProvider>,
    pub bookings: Arc<BookingService>,
    pub career: Arc<CareerService>,
}

impl AppState {
    /// State with booking-based availability and career tools disabled.
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let availability: Arc<dyn AvailabilityProvider> =
            Arc::new(BookedSlotAvailability::new(store.clone()));
        Self {
            config,
            bookings: Arc::new(BookingService::new(store.clone(), availability.clone())),
            availability,
            store,
            career: Arc::new(CareerService::disabled()),
        }
    }

    /// Set the career tools backend.
    pub fn set_career_service(&mut self, career: Arc<CareerService>) {
        self.career = career;
    }

    /// Replace the availability source used by slot listing and bookings.
    pub fn set_availability_provider(&mut self, availability: Arc<dyn AvailabilityProvider>) {
        self.bookings = Arc::new(BookingService::new(
            self.store.clone(),
            availability.clone(),
        ));
        self.availability = availability;
    }

    pub fn collection_service(&self) -> CollectionService {
        CollectionService::new(self.store.clone())
    }

    pub fn certification_service(&self) -> CertificationService {
        CertificationService::new(self.store.clone())
    }

    pub fn attendance_service(&self) -> AttendanceService {
        AttendanceService::new(self.store.clone())
    }
}

pub type SharedState = Arc<AppState>;
