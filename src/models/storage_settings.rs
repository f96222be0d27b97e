use crate::error::AppError;
use serde::{Deserialize, Serialize};
use url::Url;

/// WebDAV blob storage for photos (Nextcloud compatible)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub id: i64,
    pub server_url: String,
    pub username: String,
    pub app_password: String,
    pub remote_path: String,
    /// Base under which uploaded objects are publicly readable
    pub public_base_url: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl StorageSettings {
    pub fn new(
        server_url: String,
        username: String,
        app_password: String,
        remote_path: String,
        public_base_url: String,
    ) -> Self {
        Self {
            id: 0,
            server_url,
            username,
            app_password,
            remote_path,
            public_base_url,
            enabled: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Url::parse(self.server_url.trim())
            .map_err(|e| AppError::Validation(format!("URL do servidor inválida: {}", e)))?;
        Url::parse(self.public_base_url.trim())
            .map_err(|e| AppError::Validation(format!("URL pública inválida: {}", e)))?;

        if self.username.trim().is_empty() {
            return Err(AppError::Validation(
                "O usuário é obrigatório".to_string(),
            ));
        }
        if self.app_password.is_empty() {
            return Err(AppError::Validation(
                "A senha de app é obrigatória".to_string(),
            ));
        }
        Ok(())
    }

    /// WebDAV root of the user, e.g. `https://cloud.example.org/remote.php/dav/files/ana`
    pub fn webdav_url(&self) -> String {
        format!(
            "{}/remote.php/dav/files/{}",
            self.server_url.trim().trim_end_matches('/'),
            self.username.trim()
        )
    }

    /// Remote directory the photos live under, without trailing slash
    pub fn remote_base(&self) -> &str {
        self.remote_path.trim().trim_end_matches('/')
    }

    /// Public base as a URL that joins relative names below it
    pub fn public_base(&self) -> Result<Url, url::ParseError> {
        let base = self.public_base_url.trim();
        if base.ends_with('/') {
            Url::parse(base)
        } else {
            Url::parse(&format!("{}/", base))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StorageSettings {
        StorageSettings::new(
            "https://cloud.example.org/".to_string(),
            "ana".to_string(),
            "secret".to_string(),
            "/WildWatch/".to_string(),
            "https://cdn.example.org/wildwatch".to_string(),
        )
    }

    #[test]
    fn test_webdav_url() {
        assert_eq!(
            settings().webdav_url(),
            "https://cloud.example.org/remote.php/dav/files/ana"
        );
        assert_eq!(settings().remote_base(), "/WildWatch");
    }

    #[test]
    fn test_public_base_joins_names() {
        let url = settings()
            .public_base()
            .unwrap()
            .join("images/sighting-1.jpg")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cdn.example.org/wildwatch/images/sighting-1.jpg"
        );
    }

    #[test]
    fn test_validate() {
        assert!(settings().validate().is_ok());

        let mut bad = settings();
        bad.server_url = "not a url".to_string();
        assert!(matches!(bad.validate(), Err(AppError::Validation(_))));

        let mut bad = settings();
        bad.app_password.clear();
        assert!(bad.validate().is_err());
    }
}
