use submission_form::PersistenceError;
use thiserror::Error;

/// Central error type of the app
#[derive(Debug, Error)]
pub enum AppError {
    /// Database error (rusqlite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Permission denied (e.g. gallery access)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// WebDAV / blob storage error
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Other(String),
}

impl From<AppError> for PersistenceError {
    fn from(e: AppError) -> Self {
        PersistenceError::new(e.to_string())
    }
}

/// User-facing messages, Portuguese like the rest of the UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "Ocorreu um erro no banco de dados. Tente novamente.".to_string()
            }
            AppError::Filesystem(_) => {
                "Erro ao acessar arquivos. Verifique as permissões do app.".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("{} não foi encontrado.", msg),
            AppError::PermissionDenied(msg) => format!("Permissão necessária: {}", msg),
            AppError::Storage(_) => {
                "Não foi possível enviar a foto. Verifique a conexão.".to_string()
            }
            AppError::Other(msg) => msg.clone(),
        }
    }
}
