pub mod blob_service;
pub mod park_service;
pub mod record_store;
pub mod sighting_service;
pub mod storage_service;
pub mod submission_service;

pub use blob_service::WebDavBlobStore;
pub use park_service::*;
pub use record_store::SqliteRecordStore;
pub use sighting_service::*;
pub use storage_service::*;
pub use submission_service::{build_coordinator, AppCoordinator};
