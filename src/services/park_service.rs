use crate::error::AppError;
use crate::models::{NearbyPark, Park};
use rusqlite::Connection;
use submission_form::Coordinates;

/// Stores a park and returns its row id
pub fn create_park(conn: &Connection, park: &Park) -> Result<i64, AppError> {
    park.validate()?;

    conn.execute(
        "INSERT INTO parks (uuid, name, description, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &park.uuid,
            park.name.trim(),
            park.description.trim(),
            park.latitude,
            park.longitude,
        ),
    )?;

    Ok(conn.last_insert_rowid())
}

/// Lists all parks ordered by name
pub fn list_parks(conn: &Connection) -> Result<Vec<Park>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, name, description, latitude, longitude
         FROM parks
         ORDER BY name",
    )?;

    let parks = stmt
        .query_map([], |row| Park::try_from(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(parks)
}

pub fn count_parks(conn: &Connection) -> Result<i64, AppError> {
    let count = conn.query_row("SELECT COUNT(*) FROM parks", [], |row| row.get(0))?;
    Ok(count)
}

/// Returns up to `limit` parks sorted by great-circle distance from `origin`
pub fn nearest_parks(
    conn: &Connection,
    origin: Coordinates,
    limit: usize,
) -> Result<Vec<NearbyPark>, AppError> {
    if !origin.is_valid() {
        return Err(AppError::Validation("Localização inválida".to_string()));
    }

    let mut nearby: Vec<NearbyPark> = list_parks(conn)?
        .into_iter()
        .map(|park| NearbyPark {
            distance_km: origin.distance_km(&park.location()),
            park,
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);

    Ok(nearby)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn park(name: &str, latitude: f64, longitude: f64) -> Park {
        Park {
            id: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: "Parque público".to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_create_and_list() {
        let conn = setup_test_db();
        create_park(&conn, &park("Parque Ibirapuera", -23.587, -46.657)).unwrap();
        create_park(&conn, &park("Jardim Botânico", -22.967, -43.224)).unwrap();

        let parks = list_parks(&conn).unwrap();
        let names: Vec<_> = parks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jardim Botânico", "Parque Ibirapuera"]);
        assert_eq!(count_parks(&conn).unwrap(), 2);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let conn = setup_test_db();
        assert!(matches!(
            create_park(&conn, &park(" ", -23.0, -46.0)),
            Err(AppError::Validation(_))
        ));
        assert_eq!(count_parks(&conn).unwrap(), 0);
    }

    #[test]
    fn test_nearest_parks() {
        let conn = setup_test_db();
        create_park(&conn, &park("Parque Ibirapuera", -23.587, -46.657)).unwrap();
        create_park(&conn, &park("Parque da Cidade", -15.802, -47.908)).unwrap();
        create_park(&conn, &park("Jardim Botânico", -22.967, -43.224)).unwrap();

        // Esplanada dos Ministérios, Brasília
        let origin = Coordinates::new(-15.799, -47.864);
        let nearby = nearest_parks(&conn, origin, 2).unwrap();

        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[0].park.name, "Parque da Cidade");
        assert!(nearby[0].distance_km < 10.0);
        assert!(nearby[0].distance_km <= nearby[1].distance_km);
    }

    #[test]
    fn test_nearest_parks_empty_and_invalid() {
        let conn = setup_test_db();
        assert!(nearest_parks(&conn, Coordinates::new(0.0, 0.0), 5)
            .unwrap()
            .is_empty());
        assert!(nearest_parks(&conn, Coordinates::new(120.0, 0.0), 5).is_err());
    }
}
