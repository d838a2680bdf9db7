//! Certification model and its review state machine.
//!
//! A certification's status and audit trail change together through
//! [`Certification::transition`]; neither can be rewritten from outside this
//! module, so every status change leaves exactly one audit entry behind.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::Actor;

/// Placeholder shown when a certification has no issue date.
pub const UNSET_LABEL: &str = "Unset";
/// Placeholder shown for missing optional values.
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

/// Review status of a credential claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CertificationStatus {
    Planned,
    InProgress,
    #[serde(alias = "pending")]
    PendingReview,
    #[serde(alias = "active")]
    Completed,
    Expired,
    Rejected,
}

impl CertificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationStatus::Planned => "planned",
            CertificationStatus::InProgress => "in-progress",
            CertificationStatus::PendingReview => "pending-review",
            CertificationStatus::Completed => "completed",
            CertificationStatus::Expired => "expired",
            CertificationStatus::Rejected => "rejected",
        }
    }

    /// Statuses a new certification may start in.
    pub fn is_initial(&self) -> bool {
        matches!(
            self,
            CertificationStatus::Planned
                | CertificationStatus::InProgress
                | CertificationStatus::PendingReview
        )
    }

    /// No further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CertificationStatus::Expired | CertificationStatus::Rejected)
    }

    /// Edges of the review graph.
    pub fn can_transition_to(&self, next: CertificationStatus) -> bool {
        use CertificationStatus::*;
        matches!(
            (self, next),
            (Planned, InProgress)
                | (Planned, PendingReview)
                | (InProgress, Planned)
                | (InProgress, PendingReview)
                | (PendingReview, Completed)
                | (PendingReview, Rejected)
                | (Completed, Expired)
        )
    }

    /// Entering this status is a reviewer decision.
    pub fn requires_reviewer(&self) -> bool {
        matches!(
            self,
            CertificationStatus::Completed
                | CertificationStatus::Rejected
                | CertificationStatus::Expired
        )
    }

    /// Audit label recorded when a certification moves into this status.
    pub fn audit_label(&self) -> &'static str {
        match self {
            CertificationStatus::Planned => "Planned",
            CertificationStatus::InProgress => "Started",
            CertificationStatus::PendingReview => "Submitted for Review",
            CertificationStatus::Completed => "Approved",
            CertificationStatus::Expired => "Expired",
            CertificationStatus::Rejected => "Rejected",
        }
    }

    /// Audit label recorded when a certification is created in this status.
    pub fn creation_label(&self) -> &'static str {
        match self {
            CertificationStatus::PendingReview => "Uploaded",
            other => other.audit_label(),
        }
    }
}

impl fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.trim().to_string()))
            .map_err(|_| format!("unknown certification status '{s}'"))
    }
}

/// One line of a certification's audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    pub id: String,
    pub action: String,
    pub date: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AuditEntry {
    pub fn record(
        action: impl Into<String>,
        actor: impl Into<String>,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            date: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            actor: actor.into(),
            comment: comment.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Why a status change was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("certification is already {0}")]
    Unchanged(CertificationStatus),

    #[error("cannot move a certification from {from} to {to}")]
    NotAllowed {
        from: CertificationStatus,
        to: CertificationStatus,
    },

    #[error("only a reviewer can mark a certification {0}")]
    ReviewerOnly(CertificationStatus),

    #[error("only the owner or a reviewer can change this certification")]
    NotOwner,
}

/// A single credential claim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veteran_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veteran_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub issuer: String,
    #[serde(default = "default_status")]
    status: CertificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default)]
    audit_trail: Vec<AuditEntry>,
    /// Fields this model does not know about, kept verbatim.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

fn default_status() -> CertificationStatus {
    CertificationStatus::PendingReview
}

impl Certification {
    pub fn new(
        name: impl Into<String>,
        issuer: impl Into<String>,
        owner: &Actor,
        status: CertificationStatus,
    ) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            veteran_id: Some(owner.id.clone()),
            user_id: Some(owner.id.clone()),
            veteran_name: Some(owner.name.clone()),
            name: Some(name.clone()),
            title: Some(name),
            issuer: issuer.into(),
            status,
            issue_date: None,
            expiry_date: None,
            credential_id: None,
            evidence_url: None,
            audit_trail: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn status(&self) -> CertificationStatus {
        self.status
    }

    pub fn audit_trail(&self) -> &[AuditEntry] {
        &self.audit_trail
    }

    /// Owner reference; `veteranId` wins over the legacy `userId`.
    pub fn owner_id(&self) -> Option<&str> {
        self.veteran_id.as_deref().or(self.user_id.as_deref())
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id() == Some(user_id)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("Untitled certification")
    }

    pub fn issue_date_label(&self) -> &str {
        non_blank(self.issue_date.as_deref()).unwrap_or(UNSET_LABEL)
    }

    pub fn expiry_date_label(&self) -> &str {
        non_blank(self.expiry_date.as_deref()).unwrap_or(NOT_AVAILABLE_LABEL)
    }

    pub fn credential_label(&self) -> &str {
        non_blank(self.credential_id.as_deref()).unwrap_or(NOT_AVAILABLE_LABEL)
    }

    /// Discard any supplied history and record the creation event.
    pub fn start_audit_trail(&mut self, actor_name: &str, at: DateTime<Utc>) {
        self.audit_trail = vec![AuditEntry::record(
            self.status.creation_label(),
            actor_name,
            None,
            at,
        )];
    }

    /// Move to `next`, appending one audit entry for `actor`.
    ///
    /// On error nothing is modified.
    pub fn transition(
        &mut self,
        next: CertificationStatus,
        actor: &Actor,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<&AuditEntry, TransitionError> {
        if next == self.status {
            return Err(TransitionError::Unchanged(next));
        }
        if !self.status.can_transition_to(next) {
            return Err(TransitionError::NotAllowed {
                from: self.status,
                to: next,
            });
        }
        if next.requires_reviewer() && !actor.is_reviewer() {
            return Err(TransitionError::ReviewerOnly(next));
        }
        if !actor.is_reviewer() && !self.is_owned_by(&actor.id) {
            return Err(TransitionError::NotOwner);
        }

        self.status = next;
        self.audit_trail
            .push(AuditEntry::record(next.audit_label(), &actor.name, comment, at));
        Ok(&self.audit_trail[self.audit_trail.len() - 1])
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
