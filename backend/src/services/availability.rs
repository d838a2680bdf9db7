//! Mentor slot availability.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::booking::{candidate_slots, SlotAvailability};
use crate::models::Collection;
use crate::storage::DocumentStore;

/// Answers which candidate slots a mentor can still take on a date.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// Every candidate slot for the date, in order, with its availability
    async fn slots(&self, mentor_id: &str, date: NaiveDate) -> Result<Vec<SlotAvailability>>;

    async fn is_available(&self, mentor_id: &str, date: NaiveDate, time: &str) -> Result<bool> {
        Ok(self
            .slots(mentor_id, date)
            .await?
            .iter()
            .any(|slot| slot.time == time && slot.available))
    }
}

/// A slot is taken once the mentor has a booking at that date and time.
pub struct BookedSlotAvailability {
    store: Arc<dyn DocumentStore>,
}

impl BookedSlotAvailability {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn booked_times(&self, mentor_id: &str, date: NaiveDate) -> Result<HashSet<String>> {
        fn field<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
            doc.get(key).and_then(Value::as_str).map(str::trim)
        }
        let same_day = |raw: &str| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or(false, |booked| booked == date)
        };

        Ok(self
            .store
            .list(Collection::Bookings)
            .await?
            .iter()
            .filter(|doc| {
                field(doc, "mentorId") == Some(mentor_id)
                    && field(doc, "date").is_some_and(|raw| same_day(raw))
            })
            .filter_map(|doc| field(doc, "time").map(str::to_owned))
            .collect())
    }
}

#[async_trait]
impl AvailabilityProvider for BookedSlotAvailability {
    async fn slots(&self, mentor_id: &str, date: NaiveDate) -> Result<Vec<SlotAvailability>> {
        let booked = self.booked_times(mentor_id, date).await?;
        Ok(candidate_slots()
            .into_iter()
            .map(|time| SlotAvailability {
                available: !booked.contains(&time),
                time,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_booked_slot_is_unavailable_for_that_mentor_only() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .insert(
                Collection::Bookings,
                json!({"mentorId": "m1", "date": "2026-05-04", "time": "10:30"}),
            )
            .await
            .unwrap();
        let provider = BookedSlotAvailability::new(store);
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();

        let slots = provider.slots("m1", date).await.unwrap();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.iter().filter(|s| !s.available).count(), 1);
        assert!(!provider.is_available("m1", date, "10:30").await.unwrap());
        assert!(provider.is_available("m2", date, "10:30").await.unwrap());
        assert!(provider
            .is_available("m1", date.succ_opt().unwrap(), "10:30")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_non_candidate_time_is_never_available() {
        let provider = BookedSlotAvailability::new(Arc::new(MemoryDocumentStore::new()));
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert!(!provider.is_available("m1", date, "12:00").await.unwrap());
    }

    #[tokio::test]
    async fn test_unpadded_stored_date_still_blocks_slot() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .insert(
                Collection::Bookings,
                json!({"mentorId": "m1", "date": "2026-5-4", "time": "10:30"}),
            )
            .await
            .unwrap();
        let provider = BookedSlotAvailability::new(store);
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert!(!provider.is_available("m1", date, "10:30").await.unwrap());
    }
}
