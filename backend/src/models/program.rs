//! Training program model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    Active,
    Planning,
    Archived,
    Completed,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub status: ProgramStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl Program {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("Untitled program")
    }

    /// Enrollment as reported, falling back to the participant list.
    pub fn enrollment(&self) -> usize {
        self.enrolled_count
            .map(|n| n as usize)
            .unwrap_or(self.participants.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_and_participants_fallbacks() {
        let program: Program = serde_json::from_value(json!({
            "id": "prog2",
            "title": "Cybersecurity Bootcamp",
            "description": "",
            "status": "upcoming",
            "participants": ["u1", "u2"]
        }))
        .unwrap();
        assert_eq!(program.display_name(), "Cybersecurity Bootcamp");
        assert_eq!(program.enrollment(), 2);
        assert_eq!(program.status, ProgramStatus::Upcoming);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<Program, _> =
            serde_json::from_value(json!({"id": "p", "status": "paused"}));
        assert!(result.is_err());
    }
}
