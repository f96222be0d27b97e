use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distances
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A coordinate pair handed back by the location-picking screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and within WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Haversine distance in kilometres
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// In-progress user input for one entity.
///
/// Created empty when the form mounts and mutated field by field. Only the
/// form mutates it; the coordinator reads a snapshot at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    pub species: String,
    pub description: String,
    pub identified: bool,
    pub photo_local_ref: Option<String>,
    pub location: Option<Coordinates>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The final record handed to persistence.
///
/// `species` is the empty string (never absent) when the species was not
/// identified, and `location` cannot be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedRecord {
    species: String,
    description: String,
    identified_species: bool,
    location: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    date: DateTime<Utc>,
}

impl SubmittedRecord {
    pub fn new(
        species: impl Into<String>,
        description: impl Into<String>,
        identified_species: bool,
        location: Coordinates,
        photo: Option<String>,
        date: DateTime<Utc>,
    ) -> Self {
        let species = if identified_species {
            species.into()
        } else {
            String::new()
        };

        Self {
            species,
            description: description.into(),
            identified_species,
            location,
            photo,
            date,
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn identified_species(&self) -> bool {
        self.identified_species
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
