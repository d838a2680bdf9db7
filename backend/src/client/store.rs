//! View-scoped record store with explicit load states.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::{ClientResult, CollectionApi};
use crate::models::attendance::AttendanceRecord;
use crate::models::catalog::{Course, ForumPost, Mentor};
use crate::models::certification::Certification;
use crate::models::program::Program;
use crate::models::Collection;

/// Anything addressable by its string id.
pub trait Record {
    fn record_id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn record_id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(Certification, AttendanceRecord, Course, Mentor, ForumPost, Program);

impl Record for Value {
    fn record_id(&self) -> &str {
        self.get("id").and_then(Value::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Retryable; the message is shown as an error banner.
    Failed(String),
}

/// Records of one collection as seen by one view.
pub struct ViewStore<T> {
    collection: Collection,
    items: Vec<T>,
    state: LoadState,
    stale: bool,
    fallback: Option<Vec<T>>,
    showing_fallback: bool,
}

impl<T> ViewStore<T>
where
    T: DeserializeOwned + Record + Clone,
{
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            items: Vec::new(),
            state: LoadState::Idle,
            stale: false,
            fallback: None,
            showing_fallback: false,
        }
    }

    /// Built-in content shown when the server has none or cannot be reached.
    pub fn with_fallback(mut self, fallback: Vec<T>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True when the items are the built-in fallback rather than server data.
    pub fn is_fallback(&self) -> bool {
        self.showing_fallback
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.record_id() == id)
    }

    /// Fetch on first use or after [`invalidate`](Self::invalidate).
    pub async fn hydrate(&mut self, api: &dyn CollectionApi) -> &LoadState {
        let needs_fetch = self.stale || matches!(self.state, LoadState::Idle | LoadState::Failed(_));
        if needs_fetch {
            self.refetch(api).await;
        }
        &self.state
    }

    /// Fetch unconditionally.
    pub async fn refetch(&mut self, api: &dyn CollectionApi) -> &LoadState {
        self.state = LoadState::Loading;
        let result = self.fetch(api).await;
        self.stale = false;

        match result {
            Ok(items) if items.is_empty() && self.fallback.is_some() => {
                self.use_fallback();
            }
            Ok(items) => {
                self.items = items;
                self.showing_fallback = false;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(collection = %self.collection, error = %e, "Failed to load records");
                if self.fallback.is_some() {
                    self.use_fallback();
                } else {
                    self.state = LoadState::Failed(format!(
                        "Could not load {}: {e}",
                        self.collection.as_str().replace('_', " ")
                    ));
                }
            }
        }
        &self.state
    }

    /// Mark the contents stale so the next `hydrate` refetches.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Replace the record with the same id. Returns false when absent.
    pub fn patch(&mut self, record: T) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.record_id() == record.record_id())
        {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    async fn fetch(&self, api: &dyn CollectionApi) -> ClientResult<Vec<T>> {
        let documents = api.list(self.collection).await?;
        let mut items = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value::<T>(document) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(collection = %self.collection, error = %e, "Skipping malformed record");
                }
            }
        }
        Ok(items)
    }

    fn use_fallback(&mut self) {
        self.items = self.fallback.clone().unwrap_or_default();
        self.showing_fallback = true;
        self.state = LoadState::Ready;
    }
}
