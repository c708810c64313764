use thiserror::Error;

#[derive(Debug, Error)]
pub enum HotelError {
    #[error("not initialized: run 'hotel init'")]
    NotInitialized,

    #[error("invalid cedula '{0}': must be exactly 10 numeric digits")]
    InvalidIdentifier(String),

    #[error("no reservations found for this cedula")]
    NoRecordsFound,

    #[error("malformed data under storage key '{key}': {reason}")]
    MalformedStorageData { key: String, reason: String },

    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("guest name must not be empty")]
    InvalidName,

    #[error("unknown reservation status '{0}': expected Confirmada, Pendiente, Completada or Cancelada")]
    InvalidStatus(String),

    #[error("invalid storage key '{0}': must be alphanumeric with '-' or '_'")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HotelError>;
