//! Error types for catalog operations.

use crate::validation::ValidationErrors;

/// Failure reported by the remote store.
///
/// Remote implementations only need to expose a human-readable message; the
/// HTTP status is carried along when the failure came from a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    /// HTTP status of the failed response, if any.
    pub status: Option<u16>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ServiceError {
    /// Creates an error from a failed response.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an error for a request that never produced a response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a 404 error for a missing entity.
    #[must_use]
    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::new(404, format!("{kind} not found: {id}"))
    }

    /// Returns `true` if the remote store reported the entity as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Errors surfaced by catalog workflows.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Local field validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    ValidationFailure(ValidationErrors),

    /// Adding an option failed during reconciliation.
    #[error("Failed to add option \"{value}\": {message}")]
    RemoteAddFailure { value: String, message: String },

    /// Removing an option failed during reconciliation.
    #[error("Failed to remove option \"{value}\": {message}")]
    RemoteRemoveFailure { value: String, message: String },

    /// The base-fields update failed; reconciliation was not attempted.
    #[error("Failed to update variant: {message}")]
    RemoteUpdateFailure { message: String },

    /// A plain CRUD call failed.
    #[error("Remote error: {0}")]
    Remote(#[from] ServiceError),
}

impl CatalogError {
    /// Creates a `RemoteAddFailure` for the given option value.
    pub fn remote_add(value: impl Into<String>, cause: &ServiceError) -> Self {
        Self::RemoteAddFailure {
            value: value.into(),
            message: cause.message.clone(),
        }
    }

    /// Creates a `RemoteRemoveFailure` for the given option value.
    pub fn remote_remove(value: impl Into<String>, cause: &ServiceError) -> Self {
        Self::RemoteRemoveFailure {
            value: value.into(),
            message: cause.message.clone(),
        }
    }

    /// Creates a `RemoteUpdateFailure`.
    pub fn remote_update(cause: &ServiceError) -> Self {
        Self::RemoteUpdateFailure {
            message: cause.message.clone(),
        }
    }

    /// Returns `true` for failures detected before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailure(_))
    }

    /// Value of the option whose remote call failed, if any.
    pub fn failed_option(&self) -> Option<&str> {
        match self {
            Self::RemoteAddFailure { value, .. } | Self::RemoteRemoveFailure { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationFailure(errors)
    }
}

/// Result type alias for catalog workflows.
pub type Result<T> = std::result::Result<T, CatalogError>;
