//! WebDAV-backed blob storage for photos
//!
//! Objects are written below the configured remote path and read back
//! through the public base URL. Missing or disabled settings surface as
//! [`UploadError::NotConfigured`] so the submission fails before the record
//! is persisted.

use futures::future::{BoxFuture, FutureExt};
use rusqlite::Connection;
use submission_form::{BlobStore, UploadError};
use url::Url;

use crate::error::AppError;
use crate::models::StorageSettings;
use crate::services::storage_service::load_storage_settings;

pub struct WebDavBlobStore {
    settings: Option<StorageSettings>,
}

impl WebDavBlobStore {
    pub fn new(settings: Option<StorageSettings>) -> Self {
        Self { settings }
    }

    /// Store configured from the settings saved in the database
    pub fn load(conn: &Connection) -> Result<Self, AppError> {
        Ok(Self::new(load_storage_settings(conn)?))
    }

    pub fn is_configured(&self) -> bool {
        self.active().is_ok()
    }

    fn active(&self) -> Result<&StorageSettings, UploadError> {
        match &self.settings {
            Some(settings) if settings.enabled => Ok(settings),
            _ => Err(UploadError::NotConfigured),
        }
    }

    fn client(settings: &StorageSettings) -> Result<reqwest_dav::Client, String> {
        reqwest_dav::ClientBuilder::new()
            .set_host(settings.webdav_url())
            .set_auth(reqwest_dav::Auth::Basic(
                settings.username.trim().to_string(),
                settings.app_password.clone(),
            ))
            .build()
            .map_err(|e| format!("WebDAV client error: {:?}", e))
    }

    /// Lists the remote folder to confirm the credentials work
    pub async fn check_connection(settings: &StorageSettings) -> Result<(), AppError> {
        let client = Self::client(settings).map_err(AppError::Storage)?;
        let base = settings.remote_base();

        if let Err(e) = client.mkcol(base).await {
            log::debug!("MKCOL '{}' note: {:?}", base, e);
        }

        client
            .list(base, reqwest_dav::Depth::Number(0))
            .await
            .map(|_| ())
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn remote_path(settings: &StorageSettings, name: &str) -> String {
        format!("{}/{}", settings.remote_base(), name)
    }
}

impl BlobStore for WebDavBlobStore {
    fn put<'a>(&'a self, name: &'a str, bytes: Vec<u8>) -> BoxFuture<'a, Result<(), UploadError>> {
        async move {
            let settings = self.active()?;
            let upload_error = |message: String| UploadError::Upload {
                name: name.to_string(),
                message,
            };

            let client = Self::client(settings).map_err(upload_error)?;
            let path = Self::remote_path(settings, name);

            // WebDAV cannot create nested collections in one call
            let mut dir = settings.remote_base().to_string();
            let parents: Vec<&str> = name.split('/').collect();
            for part in &parents[..parents.len().saturating_sub(1)] {
                dir = format!("{}/{}", dir, part);
                if let Err(e) = client.mkcol(&dir).await {
                    log::debug!("MKCOL '{}' note: {:?}", dir, e);
                }
            }

            client
                .put(&path, bytes)
                .await
                .map_err(|e| upload_error(format!("{:?}", e)))?;

            log::debug!("PUT {} done", path);
            Ok(())
        }
        .boxed()
    }

    fn download_url<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Url, UploadError>> {
        async move {
            let settings = self.active()?;
            let url_error = |message: String| UploadError::Url {
                name: name.to_string(),
                message,
            };

            let client = Self::client(settings).map_err(url_error)?;
            let path = Self::remote_path(settings, name);

            // Only hand out URLs for objects the server confirms
            let listing = client
                .list(&path, reqwest_dav::Depth::Number(0))
                .await
                .map_err(|e| url_error(format!("{:?}", e)))?;
            if listing.is_empty() {
                return Err(url_error("object not found".to_string()));
            }

            settings
                .public_base()
                .and_then(|base| base.join(name))
                .map_err(|e| url_error(e.to_string()))
        }
        .boxed()
    }
}
