//! Shared primitives for all Rust crates in PetCare.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use auth::UserIdentity;

/// Result type used across PetCare crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of a persisted record.
///
/// Ids are opaque to callers: any non-empty string is accepted as a lookup
/// key, while ids of new records are always generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Validates a caller-supplied identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Id is required".to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Generates a fresh random identifier for a new record.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an identifier from a stored UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value.to_string())
    }

    /// Returns the UUID form of the identifier, if it has one.
    #[must_use]
    pub fn to_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(self.0.as_str()).ok()
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Storage schema has not been migrated; carries a corrective instruction.
    #[error("schema missing: {0}")]
    SchemaMissing(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the human-readable message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::SchemaMissing(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, RecordId};

    #[test]
    fn record_id_rejects_blank_values() {
        assert!(matches!(RecordId::new(""), Err(AppError::Validation(_))));
        assert!(matches!(RecordId::new("  \t"), Err(AppError::Validation(_))));
    }

    #[test]
    fn record_id_keeps_non_uuid_lookup_keys() {
        let id = RecordId::new(" clinic-42 ").unwrap_or_else(|_| panic!("test"));
        assert_eq!(id.as_str(), "clinic-42");
        assert!(id.to_uuid().is_none());
    }

    #[test]
    fn generated_record_ids_are_unique_uuids() {
        let first = RecordId::generate();
        let second = RecordId::generate();

        assert_ne!(first, second);
        assert!(first.to_uuid().is_some());
        assert_eq!(first.to_string().len(), 36);
    }

    #[test]
    fn record_id_serializes_as_plain_string() {
        let id = RecordId::new("abc").unwrap_or_else(|_| panic!("test"));
        let value = serde_json::to_value(&id).unwrap_or_else(|_| panic!("test"));
        assert_eq!(value, serde_json::json!("abc"));
    }

    #[test]
    fn error_message_strips_category_prefix() {
        let error = AppError::NotFound("Clinic not found".to_owned());
        assert_eq!(error.message(), "Clinic not found");
        assert_eq!(error.to_string(), "not found: Clinic not found");
    }
}
