//! Certification vault view: owner listing, upload and reviewer actions.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::store::{LoadState, ViewStore};
use super::{ClientResult, CollectionApi};
use crate::models::certification::{AuditEntry, Certification, CertificationStatus};
use crate::models::{Actor, Collection};
use crate::storage::InsertAck;

/// Display-ready certification with placeholders filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationCard {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub veteran_name: String,
    pub status: CertificationStatus,
    pub issue_date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub audit_trail: Vec<AuditEntry>,
    /// Approve/reject buttons apply.
    pub reviewable: bool,
}

#[derive(Clone, Copy)]
enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    fn verb(self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

pub struct CertificationVault {
    api: Arc<dyn CollectionApi>,
    viewer: Actor,
    certifications: ViewStore<Certification>,
    error: Option<String>,
}

impl CertificationVault {
    pub fn new(api: Arc<dyn CollectionApi>, viewer: Actor) -> Self {
        Self {
            api,
            viewer,
            certifications: ViewStore::new(Collection::Certifications),
            error: None,
        }
    }

    pub fn viewer(&self) -> &Actor {
        &self.viewer
    }

    pub async fn load(&mut self) -> &LoadState {
        self.certifications.hydrate(self.api.as_ref()).await
    }

    pub fn state(&self) -> &LoadState {
        self.certifications.state()
    }

    /// Reviewers see everything, veterans only their own records.
    pub fn visible(&self) -> Vec<&Certification> {
        self.certifications
            .items()
            .iter()
            .filter(|c| self.viewer.is_reviewer() || c.is_owned_by(&self.viewer.id))
            .collect()
    }

    /// Certifications waiting on this reviewer. Empty for veterans.
    pub fn review_queue(&self) -> Vec<&Certification> {
        if !self.viewer.is_reviewer() {
            return Vec::new();
        }
        self.visible()
            .into_iter()
            .filter(|c| c.status() == CertificationStatus::PendingReview)
            .collect()
    }

    pub fn cards(&self) -> Vec<CertificationCard> {
        let reviewer = self.viewer.is_reviewer();
        self.visible()
            .into_iter()
            .map(|c| CertificationCard {
                id: c.id.clone(),
                title: c.display_name().to_string(),
                issuer: c.issuer.clone(),
                veteran_name: c.veteran_name.clone().unwrap_or_default(),
                status: c.status(),
                issue_date: c.issue_date_label().to_string(),
                expiry_date: c.expiry_date_label().to_string(),
                credential_id: c.credential_label().to_string(),
                audit_trail: c.audit_trail().to_vec(),
                reviewable: reviewer && c.status() == CertificationStatus::PendingReview,
            })
            .collect()
    }

    /// Retryable banner from the last failed action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Upload a new certification and reload the list.
    pub async fn upload(&mut self, document: Value) -> ClientResult<InsertAck> {
        match self.api.create(Collection::Certifications, document).await {
            Ok(ack) => {
                self.error = None;
                self.certifications.invalidate();
                self.certifications.hydrate(self.api.as_ref()).await;
                Ok(ack)
            }
            Err(e) => {
                warn!(error = %e, "Certification upload failed");
                self.error = Some(format!("Could not upload certification: {e}"));
                Err(e)
            }
        }
    }

    pub async fn approve(&mut self, id: &str, comment: Option<&str>) -> ClientResult<()> {
        let result = self.api.approve(id, comment).await;
        self.apply(id, ReviewAction::Approve, result)
    }

    pub async fn reject(&mut self, id: &str, comment: Option<&str>) -> ClientResult<()> {
        let result = self.api.reject(id, comment).await;
        self.apply(id, ReviewAction::Reject, result)
    }

    fn apply(
        &mut self,
        id: &str,
        action: ReviewAction,
        result: ClientResult<Certification>,
    ) -> ClientResult<()> {
        match result {
            Ok(certification) => {
                info!(
                    certification_id = %id,
                    status = %certification.status(),
                    "Certification {}d",
                    action.verb()
                );
                if !self.certifications.patch(certification) {
                    self.certifications.invalidate();
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(certification_id = %id, action = action.verb(), error = %e, "Review action failed");
                self.error = Some(format!("Could not {} certification: {e}", action.verb()));
                Err(e)
            }
        }
    }
}
