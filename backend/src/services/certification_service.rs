//! Certification review workflow.
//!
//! Veterans submit certifications (uploads or plans), reviewers approve,
//! reject or expire them. Every status change is a single atomic
//! read-modify-write against the store and appends one audit entry.

use chrono::Utc;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::certification::{Certification, CertificationStatus};
use crate::models::{Actor, Collection};
use crate::storage::{merge_shallow, patch_fields, DocumentStore, InsertAck};

const COLLECTION: Collection = Collection::Certifications;

/// Ownership is fixed at submission.
const OWNERSHIP_FIELDS: [&str; 2] = ["veteranId", "userId"];

/// Credential details a reviewer signed off on; frozen for everyone else
/// once review is over.
const CREDENTIAL_FIELDS: [&str; 4] = ["name", "title", "issuer", "credentialId"];

/// Owner reference of a raw certification document.
pub fn owner_of(doc: &Value) -> Option<&str> {
    doc.get("veteranId")
        .and_then(Value::as_str)
        .or_else(|| doc.get("userId").and_then(Value::as_str))
}

fn parse_stored(doc: &Value) -> Result<Certification> {
    serde_json::from_value(doc.clone())
        .map_err(|e| AppError::Internal(format!("stored certification is malformed: {e}")))
}

/// Certification service
pub struct CertificationService {
    store: Arc<dyn DocumentStore>,
}

impl CertificationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Certifications the viewer may see.
    ///
    /// Reviewers and anonymous callers get the full collection; anyone else
    /// only their own records.
    pub async fn list_visible(&self, viewer: Option<&Actor>) -> Result<Vec<Value>> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(match viewer {
            Some(viewer) if !viewer.is_reviewer() => docs
                .into_iter()
                .filter(|doc| owner_of(doc) == Some(viewer.id.as_str()))
                .collect(),
            _ => docs,
        })
    }

    /// One certification, under the same visibility rule as the list.
    ///
    /// A veteran asking for someone else's record gets `NotFound`.
    pub async fn get_visible(&self, id: &str, viewer: Option<&Actor>) -> Result<Value> {
        let not_found = || AppError::NotFound(format!("certifications '{id}' not found"));
        let doc = self.store.get(COLLECTION, id).await?.ok_or_else(not_found)?;
        match viewer {
            Some(viewer) if !viewer.is_reviewer() && owner_of(&doc) != Some(viewer.id.as_str()) => {
                Err(not_found())
            }
            _ => Ok(doc),
        }
    }

    /// Create a certification as an upload (`pending-review`) or a plan.
    pub async fn submit(&self, body: Value, actor: Option<&Actor>) -> Result<InsertAck> {
        if !body.is_object() {
            return Err(AppError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        }
        if let Some(actor) = actor.filter(|a| a.is_reviewer()) {
            return Err(AppError::Authorization(format!(
                "reviewer '{}' cannot submit certifications",
                actor.id
            )));
        }

        let mut cert: Certification = serde_json::from_value(body)
            .map_err(|e| AppError::Validation(format!("invalid certification: {e}")))?;

        if !cert.status().is_initial() {
            return Err(AppError::Validation(format!(
                "a new certification cannot start as {}",
                cert.status()
            )));
        }
        if cert.name.is_none() && cert.title.is_none() {
            return Err(AppError::Validation(
                "certification name is required".to_string(),
            ));
        }

        if let Some(actor) = actor {
            cert.veteran_id = Some(actor.id.clone());
            cert.user_id = Some(actor.id.clone());
            cert.veteran_name = Some(actor.name.clone());
        }

        let recorded_by = actor
            .map(|a| a.name.clone())
            .or_else(|| cert.veteran_name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        cert.start_audit_trail(&recorded_by, Utc::now());

        let status = cert.status();
        let ack = self
            .store
            .insert(COLLECTION, serde_json::to_value(&cert)?)
            .await?;

        info!(
            certification_id = %ack.inserted_id,
            status = %status,
            owner = cert.owner_id().unwrap_or("unknown"),
            "Certification submitted"
        );
        Ok(ack)
    }

    /// Reviewer approval: `pending-review` to `completed`.
    pub async fn approve(&self, id: &str, actor: &Actor, comment: Option<String>) -> Result<Value> {
        self.review(id, CertificationStatus::Completed, actor, comment)
            .await
    }

    /// Reviewer rejection: `pending-review` to `rejected`.
    pub async fn reject(&self, id: &str, actor: &Actor, comment: Option<String>) -> Result<Value> {
        self.review(id, CertificationStatus::Rejected, actor, comment)
            .await
    }

    /// Manual lapse: `completed` to `expired`.
    pub async fn expire(&self, id: &str, actor: &Actor, comment: Option<String>) -> Result<Value> {
        self.review(id, CertificationStatus::Expired, actor, comment)
            .await
    }

    async fn review(
        &self,
        id: &str,
        next: CertificationStatus,
        actor: &Actor,
        comment: Option<String>,
    ) -> Result<Value> {
        if !actor.is_reviewer() {
            return Err(AppError::Authorization(format!(
                "only a reviewer can mark a certification {next}"
            )));
        }
        self.transition(id, next, actor, comment).await
    }

    /// Apply one status change under the transition rules.
    pub async fn transition(
        &self,
        id: &str,
        next: CertificationStatus,
        actor: &Actor,
        comment: Option<String>,
    ) -> Result<Value> {
        let previous = OnceLock::new();

        let updated = self
            .store
            .modify(COLLECTION, id, &|doc: &mut Value| {
                let mut cert = parse_stored(doc)?;
                let from = cert.status();
                cert.transition(next, actor, comment.clone(), Utc::now())?;
                *doc = serde_json::to_value(&cert)?;
                let _ = previous.set(from);
                Ok(())
            })
            .await?;

        log_transition(id, previous.get(), next, actor);
        Ok(updated)
    }

    /// Workflow-aware partial update.
    ///
    /// `auditTrail` and the owner references cannot be written. A `status`
    /// field is applied as a transition and needs an identity; an optional
    /// `comment` goes onto the audit entry. Once review is over only a
    /// reviewer may change the credential details.
    pub async fn update(&self, id: &str, body: Value, actor: Option<&Actor>) -> Result<Value> {
        let mut fields = patch_fields(body)?;
        if fields.contains_key("auditTrail") {
            return Err(AppError::Validation(
                "auditTrail is append-only and cannot be set directly".to_string(),
            ));
        }
        if let Some(field) = OWNERSHIP_FIELDS.iter().find(|f| fields.contains_key(**f)) {
            return Err(AppError::Validation(format!(
                "{field} is set at submission and cannot be changed"
            )));
        }
        let edits_credential = CREDENTIAL_FIELDS.iter().any(|f| fields.contains_key(*f));

        let next = match fields.remove("status") {
            Some(raw) => Some(
                serde_json::from_value::<CertificationStatus>(raw)
                    .map_err(|_| AppError::Validation("invalid certification status".to_string()))?,
            ),
            None => None,
        };
        let comment = if next.is_some() {
            fields
                .remove("comment")
                .and_then(|c| c.as_str().map(str::to_owned))
        } else {
            None
        };

        let status_change = match (next, actor) {
            (Some(next), Some(actor)) => Some((next, actor)),
            (Some(_), None) => {
                return Err(AppError::Authentication(
                    "X-User-Id and X-User-Role are required to change certification status"
                        .to_string(),
                ))
            }
            (None, _) => None,
        };

        let previous = OnceLock::new();

        let updated = self
            .store
            .modify(COLLECTION, id, &|doc: &mut Value| {
                let mut cert = parse_stored(doc)?;
                if let Some(actor) = actor {
                    if !actor.is_reviewer() && !cert.is_owned_by(&actor.id) {
                        return Err(AppError::Authorization(
                            "only the owner or a reviewer can change this certification"
                                .to_string(),
                        ));
                    }
                }

                if edits_credential && !cert.status().is_initial() {
                    match actor {
                        Some(actor) if actor.is_reviewer() => {}
                        Some(_) => {
                            return Err(AppError::Authorization(format!(
                                "a {} certification can only be corrected by a reviewer",
                                cert.status()
                            )))
                        }
                        None => {
                            return Err(AppError::Authentication(
                                "a reviewer identity is required to edit a reviewed certification"
                                    .to_string(),
                            ))
                        }
                    }
                }

                if let Some((next, actor)) = status_change {
                    let from = cert.status();
                    if next != from {
                        cert.transition(next, actor, comment.clone(), Utc::now())?;
                        let _ = previous.set(from);
                    }
                }

                let mut merged = serde_json::to_value(&cert)?;
                merge_shallow(&mut merged, fields.clone());
                serde_json::from_value::<Certification>(merged.clone())
                    .map_err(|e| AppError::Validation(format!("invalid certification: {e}")))?;
                *doc = merged;
                Ok(())
            })
            .await?;

        if let (Some(from), Some((next, actor))) = (previous.get(), status_change) {
            log_transition(id, Some(from), next, actor);
        }
        Ok(updated)
    }
}

fn log_transition(
    id: &str,
    from: Option<&CertificationStatus>,
    to: CertificationStatus,
    actor: &Actor,
) {
    info!(
        certification_id = %id,
        from = from.map(|s| s.as_str()).unwrap_or("unknown"),
        to = %to,
        actor = %actor.id,
        "Certification status changed"
    );
}
