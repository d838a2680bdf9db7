//! Attendance roster operations.

use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::models::Collection;
use crate::storage::{merge_shallow, patch_fields, DocumentStore, InsertAck};

const COLLECTION: Collection = Collection::Attendance;

fn current_status(doc: &Value) -> Result<AttendanceStatus> {
    doc.get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation("attendance record has no status".to_string()))?
        .parse()
        .map_err(AppError::Validation)
}

fn to_record(doc: Value) -> Result<AttendanceRecord> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::Internal(format!("stored attendance record is malformed: {e}")))
}

/// Checks a document decodes as a record before it is written.
fn validate(doc: &Value) -> Result<()> {
    serde_json::from_value::<AttendanceRecord>(doc.clone())
        .map(|_| ())
        .map_err(|e| AppError::Validation(format!("invalid attendance record: {e}")))
}

pub struct AttendanceService {
    store: Arc<dyn DocumentStore>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a new record after checking it decodes.
    pub async fn create(&self, body: Value) -> Result<InsertAck> {
        validate(&body)?;
        let ack = self.store.insert(COLLECTION, body).await?;
        info!(attendance_id = %ack.inserted_id, "Attendance record created");
        Ok(ack)
    }

    /// Flip present/absent; `late` becomes present.
    pub async fn toggle(&self, id: &str) -> Result<AttendanceRecord> {
        let previous = OnceLock::new();
        let updated = self
            .store
            .modify(COLLECTION, id, &|doc: &mut Value| {
                let from = current_status(doc)?;
                let mut flipped = doc.clone();
                flipped["status"] = Value::String(from.toggled().as_str().to_string());
                validate(&flipped)?;
                *doc = flipped;
                let _ = previous.set(from);
                Ok(())
            })
            .await?;

        let record = to_record(updated)?;
        info!(
            attendance_id = %id,
            from = previous.get().map(|s| s.as_str()).unwrap_or("unknown"),
            to = %record.status,
            "Attendance toggled"
        );
        Ok(record)
    }

    /// Set an explicit status.
    pub async fn mark(&self, id: &str, status: AttendanceStatus) -> Result<AttendanceRecord> {
        self.update(id, serde_json::json!({ "status": status })).await
    }

    /// Partial update; a `status` field must be one of present, absent or late.
    pub async fn update(&self, id: &str, body: Value) -> Result<AttendanceRecord> {
        let fields = patch_fields(body)?;
        if let Some(status) = fields.get("status") {
            status
                .as_str()
                .ok_or_else(|| AppError::Validation("status must be a string".to_string()))?
                .parse::<AttendanceStatus>()
                .map_err(AppError::Validation)?;
        }

        let updated = self
            .store
            .modify(COLLECTION, id, &|doc: &mut Value| {
                let mut merged = doc.clone();
                merge_shallow(&mut merged, fields.clone());
                validate(&merged)?;
                *doc = merged;
                Ok(())
            })
            .await?;

        let record = to_record(updated)?;
        info!(attendance_id = %id, status = %record.status, "Attendance updated");
        Ok(record)
    }

    /// Counts for the roster, optionally restricted to one date.
    pub async fn summary(&self, date: Option<&str>) -> Result<AttendanceSummary> {
        let docs = self.store.list(COLLECTION).await?;
        let records: Vec<AttendanceRecord> = docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<AttendanceRecord>(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed attendance record");
                    None
                }
            })
            .filter(|record| date.map_or(true, |d| record.date == d))
            .collect();

        Ok(AttendanceSummary::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;
    use serde_json::json;

    async fn seeded() -> AttendanceService {
        let store = Arc::new(MemoryDocumentStore::new());
        for (id, status, date) in [
            ("att1", "present", "2024-01-27"),
            ("att2", "absent", "2024-01-27"),
            ("att3", "late", "2024-01-27"),
            ("att4", "present", "2024-01-28"),
        ] {
            store
                .insert(
                    Collection::Attendance,
                    json!({"id": id, "studentId": id, "studentName": id, "status": status, "date": date}),
                )
                .await
                .unwrap();
        }
        AttendanceService::new(store)
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let svc = seeded().await;
        assert_eq!(svc.toggle("att1").await.unwrap().status, AttendanceStatus::Absent);
        assert_eq!(svc.toggle("att1").await.unwrap().status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn test_toggle_late_marks_present() {
        let svc = seeded().await;
        assert_eq!(svc.toggle("att3").await.unwrap().status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn test_mark_late() {
        let svc = seeded().await;
        let record = svc.mark("att2", AttendanceStatus::Late).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_status() {
        let svc = seeded().await;
        let err = svc.update("att1", json!({"status": "excused"})).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_toggle_missing_record() {
        let svc = seeded().await;
        assert!(matches!(
            svc.toggle("att99").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_summary_filters_by_date() {
        let svc = seeded().await;
        let day = svc.summary(Some("2024-01-27")).await.unwrap();
        assert_eq!((day.total, day.present, day.absent, day.late), (3, 1, 1, 1));
        assert_eq!(day.rate, 33);

        let all = svc.summary(None).await.unwrap();
        assert_eq!(all.total, 4);
        assert_eq!(all.rate, 50);
    }

    #[tokio::test]
    async fn test_toggle_fractional_progress() {
        let svc = seeded().await;
        svc.create(json!({
            "id": "a1", "studentId": "u1", "studentName": "Alex",
            "status": "present", "date": "2024-01-27", "progress": 82.5
        }))
        .await
        .unwrap();

        let record = svc.toggle("a1").await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.progress, Some(82.5));

        let day = svc.summary(Some("2024-01-27")).await.unwrap();
        assert_eq!((day.total, day.absent), (4, 2));
    }

    #[tokio::test]
    async fn test_toggle_leaves_undecodable_record_unchanged() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .insert(
                Collection::Attendance,
                json!({"id": "a2", "status": "present", "studentName": ["not", "a", "string"]}),
            )
            .await
            .unwrap();
        let svc = AttendanceService::new(store.clone());

        let err = svc.toggle("a2").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let doc = store.get(Collection::Attendance, "a2").await.unwrap().unwrap();
        assert_eq!(doc["status"], "present");
    }

    #[tokio::test]
    async fn test_create_rejects_record_without_status() {
        let svc = seeded().await;
        let err = svc
            .create(json!({"id": "a3", "studentName": "Alex"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
