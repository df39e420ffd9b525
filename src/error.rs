use thiserror::Error;

#[derive(Error, Debug)]
pub enum FyyurError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid {entity}: {message}")]
    Validation { entity: &'static str, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FyyurError {
    pub fn database(message: impl Into<String>) -> Self {
        FyyurError::Database {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FyyurError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for FyyurError {
    fn from(e: rusqlite::Error) -> Self {
        FyyurError::Database {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FyyurError>;
