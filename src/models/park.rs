use crate::error::AppError;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use submission_form::{Coordinates, SubmittedRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Park {
    pub id: Option<i64>,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A park together with its distance from the query origin
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPark {
    pub park: Park,
    pub distance_km: f64,
}

impl Park {
    /// Parks reuse the species slot of the form for their name
    pub fn from_record(record: &SubmittedRecord) -> Self {
        let location = record.location();

        Self {
            id: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            name: record.species().to_string(),
            description: record.description().to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }

    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "O nome do parque é obrigatório".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "A descrição é obrigatória".to_string(),
            ));
        }
        if !self.location().is_valid() {
            return Err(AppError::Validation("Localização inválida".to_string()));
        }
        Ok(())
    }
}

impl<'r> TryFrom<&Row<'r>> for Park {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'r>) -> Result<Self, Self::Error> {
        Ok(Park {
            id: Some(row.get(0)?),
            uuid: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn park(name: &str, latitude: f64) -> Park {
        Park {
            id: None,
            uuid: "p-1".to_string(),
            name: name.to_string(),
            description: "Área verde".to_string(),
            latitude,
            longitude: -47.0,
        }
    }

    #[test]
    fn test_validate() {
        assert!(park("Parque da Cidade", -15.8).validate().is_ok());
        assert!(matches!(
            park("  ", -15.8).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(park("Parque da Cidade", 95.0).validate().is_err());
    }

    #[test]
    fn test_from_record_uses_species_as_name() {
        let record = SubmittedRecord::new(
            "Parque Ibirapuera",
            "Grande parque urbano",
            true,
            Coordinates::new(-23.587, -46.657),
            None,
            Utc::now(),
        );

        let park = Park::from_record(&record);
        assert_eq!(park.name, "Parque Ibirapuera");
        assert_eq!(park.location(), Coordinates::new(-23.587, -46.657));
    }
}
