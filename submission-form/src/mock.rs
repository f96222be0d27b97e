use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use url::Url;

use crate::coordinator::Navigator;
use crate::kind::EntityKind;
use crate::models::SubmittedRecord;
use crate::save_hook::{PersistenceError, RecordStore};
use crate::upload::{BlobStore, ImageSource, UploadError};

/// Ordered log of collaborator calls shared between mocks
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub(crate) struct MockImageSource {
    log: CallLog,
}

impl MockImageSource {
    pub(crate) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl ImageSource for MockImageSource {
    fn read<'a>(&'a self, local_ref: &'a str) -> BoxFuture<'a, Result<Vec<u8>, UploadError>> {
        async move {
            self.log.push(format!("read:{}", local_ref));
            Ok(local_ref.as_bytes().to_vec())
        }
        .boxed()
    }
}

pub(crate) struct MockBlobStore {
    log: CallLog,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail: bool,
    base_url: Url,
}

impl MockBlobStore {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            blobs: Mutex::new(HashMap::new()),
            fail: false,
            base_url: Url::parse("https://storage.example.org/").unwrap(),
        }
    }

    pub(crate) fn failing(log: CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(name)
    }
}

impl BlobStore for MockBlobStore {
    fn put<'a>(&'a self, name: &'a str, bytes: Vec<u8>) -> BoxFuture<'a, Result<(), UploadError>> {
        async move {
            // suspend once so concurrent submits interleave
            tokio::task::yield_now().await;
            self.log.push(format!("put:{}", name));

            if self.fail {
                return Err(UploadError::Upload {
                    name: name.to_string(),
                    message: "connection reset".to_string(),
                });
            }

            self.blobs.lock().unwrap().insert(name.to_string(), bytes);
            Ok(())
        }
        .boxed()
    }

    fn download_url<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Url, UploadError>> {
        async move {
            self.log.push(format!("url:{}", name));
            self.base_url.join(name).map_err(|e| UploadError::Url {
                name: name.to_string(),
                message: e.to_string(),
            })
        }
        .boxed()
    }
}

pub(crate) struct MockRecordStore {
    log: CallLog,
    saved: Mutex<Vec<(EntityKind, SubmittedRecord)>>,
    failures_left: Mutex<usize>,
}

impl MockRecordStore {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            saved: Mutex::new(Vec::new()),
            failures_left: Mutex::new(0),
        }
    }

    /// Rejects the first `n` saves
    pub(crate) fn failing_times(log: CallLog, n: usize) -> Self {
        let store = Self::new(log);
        *store.failures_left.lock().unwrap() = n;
        store
    }

    pub(crate) fn saved(&self) -> Vec<(EntityKind, SubmittedRecord)> {
        self.saved.lock().unwrap().clone()
    }
}

impl RecordStore for MockRecordStore {
    fn save<'a>(
        &'a self,
        kind: EntityKind,
        record: &'a SubmittedRecord,
    ) -> BoxFuture<'a, Result<(), PersistenceError>> {
        async move {
            tokio::task::yield_now().await;
            self.log.push(format!("save:{}", kind.as_str()));

            {
                let mut failures_left = self.failures_left.lock().unwrap();
                if *failures_left > 0 {
                    *failures_left -= 1;
                    return Err(PersistenceError::new("database is locked"));
                }
            }

            self.saved.lock().unwrap().push((kind, record.clone()));
            Ok(())
        }
        .boxed()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}
