//! User roles and the acting identity attached to a request.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Role chosen at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Veteran,
    /// Reviewer role: verifies certifications, runs rosters.
    #[serde(alias = "reviewer")]
    Teacher,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Veteran => "veteran",
            UserRole::Teacher => "teacher",
        }
    }

    pub fn is_reviewer(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "veteran" => Ok(UserRole::Veteran),
            "teacher" | "reviewer" => Ok(UserRole::Teacher),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Who is performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn is_reviewer(&self) -> bool {
        self.role.is_reviewer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_accepts_reviewer_alias() {
        assert_eq!("reviewer".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert_eq!("Teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert_eq!("veteran".parse::<UserRole>().unwrap(), UserRole::Veteran);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Teacher).unwrap(), "teacher");
    }
}
