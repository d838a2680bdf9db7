//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::middleware::identity::identity_middleware;
use super::middleware::tracing::correlation_id_middleware;
use super::SharedState;
use crate::models::Collection;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    let openapi = super::openapi::build_openapi();

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", openapi))
        .nest("/api", api_routes())
        .layer(middleware::from_fn(correlation_id_middleware))
        .with_state(state)
}

/// Collections with their own workflow routers.
const SPECIALISED: [Collection; 4] = [
    Collection::Certifications,
    Collection::Attendance,
    Collection::Bookings,
    Collection::Mentors,
];

fn api_routes() -> Router<SharedState> {
    let mut router = Router::new()
        .nest("/certifications", handlers::certifications::router())
        .nest("/attendance", handlers::attendance::router())
        .nest("/bookings", handlers::bookings::router())
        .nest("/mentors", handlers::bookings::mentors_router())
        .nest("/career", handlers::career::router());

    for collection in Collection::ALL {
        if SPECIALISED.contains(&collection) {
            continue;
        }
        router = router.nest(
            &format!("/{}", collection.slug()),
            handlers::collections::router(collection),
        );
    }

    router.layer(middleware::from_fn(identity_middleware))
}

