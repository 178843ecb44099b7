//! Error type shared by every store operation.

use std::fmt::{Display, Formatter};

use serde_json::Error as SerdeError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Database(String),
    Serialization(String),
    NotFound(String),
    Validation(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "Database error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StoreError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io_err) => StoreError::Database(format!("IO error: {}", io_err)),
            sled::Error::Corruption { .. } => {
                StoreError::Database(format!("database is corrupted: {:?}", err))
            }
            sled::Error::CollectionNotFound(name) => {
                StoreError::NotFound(format!("collection '{:?}' not found", name))
            }
            _ => StoreError::Database(format!("database error: {:?}", err)),
        }
    }
}

impl From<SerdeError> for StoreError {
    fn from(err: SerdeError) -> Self {
        StoreError::Serialization(format!("JSON serialization error: {}", err))
    }
}
