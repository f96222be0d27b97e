use crate::error::AppError;
use crate::models::Sighting;
use chrono::SecondsFormat;
use rusqlite::Connection;
use submission_form::EntityKind;

/// Fauna and flora sightings live in separate tables with the same layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightingTable {
    Fauna,
    Flora,
}

impl SightingTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            SightingTable::Fauna => "sightings",
            SightingTable::Flora => "flora_sightings",
        }
    }

    /// Parks are not sightings
    pub fn for_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Sighting => Some(SightingTable::Fauna),
            EntityKind::Flora => Some(SightingTable::Flora),
            EntityKind::Park => None,
        }
    }
}

fn validate(sighting: &Sighting) -> Result<(), AppError> {
    if sighting.description.trim().is_empty() {
        return Err(AppError::Validation(
            "A descrição é obrigatória".to_string(),
        ));
    }
    if sighting.identified_species && sighting.species.trim().is_empty() {
        return Err(AppError::Validation("A espécie é obrigatória".to_string()));
    }
    if !sighting.location().is_valid() {
        return Err(AppError::Validation("Localização inválida".to_string()));
    }
    Ok(())
}

/// Stores a sighting and returns its row id
pub fn create_sighting(
    conn: &Connection,
    table: SightingTable,
    sighting: &Sighting,
) -> Result<i64, AppError> {
    validate(sighting)?;

    // Unidentified sightings never carry a species name
    let species = if sighting.identified_species {
        sighting.species.trim()
    } else {
        ""
    };

    conn.execute(
        &format!(
            "INSERT INTO {} (uuid, species, description, identified_species, latitude, longitude, photo, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            table.table_name()
        ),
        (
            &sighting.uuid,
            species,
            sighting.description.trim(),
            sighting.identified_species,
            sighting.latitude,
            sighting.longitude,
            &sighting.photo,
            sighting
                .date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    )?;

    Ok(conn.last_insert_rowid())
}

#[allow(dead_code)]
pub fn get_sighting(conn: &Connection, table: SightingTable, id: i64) -> Result<Sighting, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, uuid, species, description, identified_species, latitude, longitude, photo, date
         FROM {} WHERE id = ?1",
        table.table_name()
    ))?;

    stmt.query_row([id], |row| Sighting::try_from(row))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::NotFound("Avistamento".to_string()),
            _ => AppError::Database(e),
        })
}

/// Lists sightings, newest first
pub fn list_sightings(conn: &Connection, table: SightingTable) -> Result<Vec<Sighting>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, uuid, species, description, identified_species, latitude, longitude, photo, date
         FROM {}
         ORDER BY date DESC, id DESC",
        table.table_name()
    ))?;

    let sightings = stmt
        .query_map([], |row| Sighting::try_from(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sightings)
}

pub fn count_sightings(conn: &Connection, table: SightingTable) -> Result<i64, AppError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table.table_name()),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
