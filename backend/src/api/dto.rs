//! Shared request/response types for API handlers.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Optional reviewer note attached to a workflow action.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReviewNote {
    #[serde(default)]
    pub comment: Option<String>,
}

/// `?date=YYYY-MM-DD` filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: Option<String>,
}
