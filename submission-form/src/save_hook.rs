use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::kind::EntityKind;
use crate::models::SubmittedRecord;

/// Error returned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not save record: {message}")]
pub struct PersistenceError {
    message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Persists finished records
pub trait RecordStore: Send + Sync {
    fn save<'a>(
        &'a self,
        kind: EntityKind,
        record: &'a SubmittedRecord,
    ) -> BoxFuture<'a, Result<(), PersistenceError>>;
}

/// Wraps a [`RecordStore`] with the `loading` and `error` state the form
/// observes.
///
/// The loading flag is raised for the whole submission, not only the save,
/// and is what suppresses a second submit while one is in flight.
pub struct SaveHook<S> {
    store: S,
    loading: AtomicBool,
    error: Mutex<Option<String>>,
}

/// Lowers the loading flag when the submission ends, however it ends
pub(crate) struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<S: RecordStore> SaveHook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            loading: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Message of the last failed attempt, cleared when a new one starts
    pub fn error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Raises the loading flag, or returns `None` if it is already raised
    pub(crate) fn begin(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard {
                flag: &self.loading,
            })
    }

    pub(crate) fn set_error(&self, message: Option<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }

    pub async fn save(
        &self,
        kind: EntityKind,
        record: &SubmittedRecord,
    ) -> Result<(), PersistenceError> {
        let result = self.store.save(kind, record).await;

        match &result {
            Ok(()) => {
                log::info!("Saved {} record", kind.as_str());
                self.set_error(None);
            }
            Err(e) => {
                log::error!("Saving {} record failed: {}", kind.as_str(), e);
                self.set_error(Some(e.to_string()));
            }
        }

        result
    }
}
