//! CORS policy for browser clients.

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CorsOrigins;
use crate::error::{AppError, Result};

/// Response headers a browser script may read.
const EXPOSED: [HeaderName; 1] = [HeaderName::from_static("x-correlation-id")];

pub fn cors_layer(origins: &CorsOrigins) -> Result<CorsLayer> {
    let layer = match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let origins = list
                .iter()
                .map(|o| {
                    o.parse::<HeaderValue>()
                        .map_err(|_| AppError::Config(format!("invalid CORS origin '{o}'")))
                })
                .collect::<Result<Vec<_>>>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    HeaderName::from_static("x-user-id"),
                    HeaderName::from_static("x-user-name"),
                    HeaderName::from_static("x-user-role"),
                    HeaderName::from_static("x-correlation-id"),
                ])
        }
    };
    Ok(layer.expose_headers(EXPOSED))
}
