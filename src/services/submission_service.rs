use std::path::Path;

use submission_form::{EntityKind, FsImageSource, SubmitCoordinator};

use crate::database;
use crate::services::{SqliteRecordStore, WebDavBlobStore};

/// The submission workflow wired to the app's storage
pub type AppCoordinator = SubmitCoordinator<FsImageSource, WebDavBlobStore, SqliteRecordStore>;

/// Coordinator for `kind` backed by the platform database
pub fn build_coordinator(kind: EntityKind) -> AppCoordinator {
    build_coordinator_at(kind, &database::get_database_path())
}

/// Blob storage settings are read once, when the form is opened
pub fn build_coordinator_at(kind: EntityKind, db_path: &Path) -> AppCoordinator {
    let blobs = match database::open_database(db_path).and_then(|conn| WebDavBlobStore::load(&conn)) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Could not load storage settings: {}", e);
            WebDavBlobStore::new(None)
        }
    };

    if !blobs.is_configured() {
        log::debug!("Photo storage not configured; photo uploads will fail");
    }

    SubmitCoordinator::new(kind, FsImageSource, blobs, SqliteRecordStore::new(db_path))
}
