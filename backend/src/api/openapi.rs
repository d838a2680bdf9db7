//! OpenAPI specification generated from handler annotations via utoipa.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::Collection;

/// Top-level OpenAPI document for the VetPath API.
///
/// Each handler module contributes its own paths and schemas via a
/// per-module `#[derive(OpenApi)]` struct merged in at startup.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VetPath API",
        description = "Veteran learning platform: records, certification review, attendance, mentorship bookings and career tools.",
        version = "0.1.0",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    modifiers(&IdentityAddon),
    tags(
        (name = "collections", description = "Generic list/create/get/update per collection"),
        (name = "certifications", description = "Certification upload and review workflow"),
        (name = "attendance", description = "Attendance roster"),
        (name = "bookings", description = "Mentorship bookings and slot availability"),
        (name = "career", description = "Skills translator, resume refiner, interview coach, assistant"),
        (name = "health", description = "Health and readiness checks"),
    ),
    components(schemas(ErrorResponse, Collection))
)]
pub struct ApiDoc;

/// Standard error response body returned by all endpoints on failure.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code (e.g. "NOT_FOUND", "CONFLICT")
    pub code: String,
}

/// Documents the identity headers as API-key style schemes.
struct IdentityAddon;

impl Modify for IdentityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            for (name, header) in [
                ("user_id", "X-User-Id"),
                ("user_name", "X-User-Name"),
                ("user_role", "X-User-Role"),
            ] {
                components.add_security_scheme(
                    name,
                    SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(header))),
                );
            }
        }
    }
}

/// Build the merged OpenAPI document from all handler modules.
pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    doc.merge(super::handlers::collections::CollectionsApiDoc::openapi());
    doc.merge(super::handlers::certifications::CertificationsApiDoc::openapi());
    doc.merge(super::handlers::attendance::AttendanceApiDoc::openapi());
    doc.merge(super::handlers::bookings::BookingsApiDoc::openapi());
    doc.merge(super::handlers::career::CareerApiDoc::openapi());
    doc.merge(super::handlers::health::HealthApiDoc::openapi());

    doc
}
