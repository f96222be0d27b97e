pub mod park;
pub mod sighting;
pub mod storage_settings;

pub use park::{NearbyPark, Park};
pub use sighting::Sighting;
pub use storage_settings::StorageSettings;
