use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use submission_form::{Coordinates, SubmittedRecord};

/// A fauna or flora sighting as stored in SQLite.
///
/// Both tables share this shape; which table a row came from is decided by
/// [`crate::services::SightingTable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sighting {
    pub id: Option<i64>,
    pub uuid: String,
    pub species: String,
    pub description: String,
    pub identified_species: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub photo: Option<String>,
    pub date: DateTime<Utc>,
}

impl Sighting {
    pub fn from_record(record: &SubmittedRecord) -> Self {
        let location = record.location();

        Self {
            id: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            species: record.species().to_string(),
            description: record.description().to_string(),
            identified_species: record.identified_species(),
            latitude: location.latitude,
            longitude: location.longitude,
            photo: record.photo().map(str::to_string),
            date: record.date(),
        }
    }

    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Species name, or a placeholder for unidentified sightings
    pub fn display_name(&self) -> &str {
        if self.identified_species && !self.species.is_empty() {
            &self.species
        } else {
            "Espécie não identificada"
        }
    }
}

impl<'r> TryFrom<&Row<'r>> for Sighting {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'r>) -> Result<Self, Self::Error> {
        let date_str: String = row.get(8)?;
        let date = DateTime::parse_from_rfc3339(&date_str)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Sighting {
            id: Some(row.get(0)?),
            uuid: row.get(1)?,
            species: row.get(2)?,
            description: row.get(3)?,
            identified_species: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            photo: row.get(7)?,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record = SubmittedRecord::new(
            "Ipê",
            "Árvore com flores amarelas",
            true,
            Coordinates::new(-15.79, -47.88),
            Some("https://storage.example.org/images/flora-1.jpg".to_string()),
            Utc::now(),
        );

        let sighting = Sighting::from_record(&record);
        assert_eq!(sighting.id, None);
        assert_eq!(sighting.species, "Ipê");
        assert_eq!(sighting.display_name(), "Ipê");
        assert_eq!(sighting.location(), Coordinates::new(-15.79, -47.88));
        assert_eq!(
            sighting.photo.as_deref(),
            Some("https://storage.example.org/images/flora-1.jpg")
        );
        assert!(uuid::Uuid::parse_str(&sighting.uuid).is_ok());
    }

    #[test]
    fn test_display_name_unidentified() {
        let record = SubmittedRecord::new(
            "",
            "Pássaro pequeno",
            false,
            Coordinates::new(0.0, 0.0),
            None,
            Utc::now(),
        );

        assert_eq!(
            Sighting::from_record(&record).display_name(),
            "Espécie não identificada"
        );
    }
}
