use std::path::PathBuf;

use futures::future::{BoxFuture, FutureExt};
use submission_form::{EntityKind, PersistenceError, RecordStore, SubmittedRecord};

use crate::database;
use crate::error::AppError;
use crate::models::{Park, Sighting};
use crate::services::park_service::create_park;
use crate::services::sighting_service::{create_sighting, SightingTable};

/// Persists submitted records into the app's SQLite database.
///
/// A connection is opened per save, the same way the screens do it.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    db_path: PathBuf,
}

impl SqliteRecordStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn insert(&self, kind: EntityKind, record: &SubmittedRecord) -> Result<i64, AppError> {
        let conn = database::open_database(&self.db_path)?;

        match SightingTable::for_kind(kind) {
            Some(table) => create_sighting(&conn, table, &Sighting::from_record(record)),
            None => create_park(&conn, &Park::from_record(record)),
        }
    }
}

impl RecordStore for SqliteRecordStore {
    fn save<'a>(
        &'a self,
        kind: EntityKind,
        record: &'a SubmittedRecord,
    ) -> BoxFuture<'a, Result<(), PersistenceError>> {
        async move {
            let id = self.insert(kind, record)?;
            log::debug!("Inserted {} record with id {}", kind.as_str(), id);
            Ok(())
        }
        .boxed()
    }
}
