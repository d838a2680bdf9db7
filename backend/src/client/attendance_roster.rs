//! Attendance roster view: toggle and mark with server confirmation.

use std::sync::Arc;
use tracing::{info, warn};

use super::store::{LoadState, ViewStore};
use super::{ClientResult, CollectionApi};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::models::Collection;

pub struct AttendanceRoster {
    api: Arc<dyn CollectionApi>,
    records: ViewStore<AttendanceRecord>,
    date: Option<String>,
}

impl AttendanceRoster {
    pub fn new(api: Arc<dyn CollectionApi>) -> Self {
        Self {
            api,
            records: ViewStore::new(Collection::Attendance),
            date: None,
        }
    }

    /// Restrict the roster to one `YYYY-MM-DD` date.
    pub fn for_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub async fn load(&mut self) -> &LoadState {
        self.records.hydrate(self.api.as_ref()).await
    }

    pub async fn reload(&mut self) -> &LoadState {
        self.records.refetch(self.api.as_ref()).await
    }

    pub fn state(&self) -> &LoadState {
        self.records.state()
    }

    pub fn records(&self) -> Vec<&AttendanceRecord> {
        self.records
            .items()
            .iter()
            .filter(|r| self.date.as_deref().map_or(true, |d| r.date == d))
            .collect()
    }

    pub fn status_of(&self, id: &str) -> Option<AttendanceStatus> {
        self.records.find(id).map(|r| r.status)
    }

    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary::from_records(self.records())
    }

    /// Flip present/absent. The roster only changes once the server confirms.
    pub async fn toggle(&mut self, id: &str) -> ClientResult<AttendanceStatus> {
        let result = self.api.toggle(id).await;
        self.apply(id, "toggle", result)
    }

    /// Set an explicit status, including `late`.
    pub async fn mark(&mut self, id: &str, status: AttendanceStatus) -> ClientResult<AttendanceStatus> {
        let result = self.api.mark(id, status).await;
        self.apply(id, "mark", result)
    }

    fn apply(
        &mut self,
        id: &str,
        action: &str,
        result: ClientResult<AttendanceRecord>,
    ) -> ClientResult<AttendanceStatus> {
        match result {
            Ok(record) => {
                let status = record.status;
                if !self.records.patch(record) {
                    self.records.invalidate();
                }
                info!(attendance_id = %id, action, status = %status, "Attendance updated");
                Ok(status)
            }
            Err(e) => {
                warn!(attendance_id = %id, action, error = %e, "Attendance update failed; roster unchanged");
                Err(e)
            }
        }
    }
}
