use crate::error::AppError;
use crate::models::StorageSettings;
use rusqlite::Connection;

/// Loads the blob storage settings from the database
pub fn load_storage_settings(conn: &Connection) -> Result<Option<StorageSettings>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, server_url, username, app_password, remote_path, public_base_url, enabled, created_at, updated_at
         FROM storage_settings
         ORDER BY id DESC
         LIMIT 1",
    )?;

    let result = stmt.query_row([], |row| {
        Ok(StorageSettings {
            id: row.get(0)?,
            server_url: row.get(1)?,
            username: row.get(2)?,
            app_password: row.get(3)?,
            remote_path: row.get(4)?,
            public_base_url: row.get(5)?,
            enabled: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    });

    match result {
        Ok(settings) => Ok(Some(settings)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(AppError::Database(e)),
    }
}

/// Saves or updates the blob storage settings
pub fn save_storage_settings(
    conn: &Connection,
    settings: &StorageSettings,
) -> Result<i64, AppError> {
    settings.validate()?;

    if let Some(existing) = load_storage_settings(conn)? {
        conn.execute(
            "UPDATE storage_settings
             SET server_url = ?1, username = ?2, app_password = ?3, remote_path = ?4, public_base_url = ?5, enabled = ?6
             WHERE id = ?7",
            (
                settings.server_url.trim(),
                settings.username.trim(),
                &settings.app_password,
                settings.remote_path.trim(),
                settings.public_base_url.trim(),
                settings.enabled,
                existing.id,
            ),
        )?;
        Ok(existing.id)
    } else {
        conn.execute(
            "INSERT INTO storage_settings (server_url, username, app_password, remote_path, public_base_url, enabled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                settings.server_url.trim(),
                settings.username.trim(),
                &settings.app_password,
                settings.remote_path.trim(),
                settings.public_base_url.trim(),
                settings.enabled,
            ),
        )?;
        Ok(conn.last_insert_rowid())
    }
}

/// Enables or disables photo uploads
pub fn set_storage_enabled(conn: &Connection, enabled: bool) -> Result<(), AppError> {
    conn.execute(
        "UPDATE storage_settings SET enabled = ?1 WHERE id = (SELECT MAX(id) FROM storage_settings)",
        [enabled],
    )?;
    Ok(())
}

pub fn delete_storage_settings(conn: &Connection) -> Result<(), AppError> {
    conn.execute("DELETE FROM storage_settings", [])?;
    Ok(())
}
