//! Catalog error taxonomy
//!
//! Typed errors surfaced by the use-case layer. Repository internals
//! propagate `anyhow::Error`; the `Operation` variant wraps those at the
//! boundary so callers keep the original cause.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("conflict: {reason}")]
    Conflict { reason: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("invalid import payload: {source}")]
    Format {
        #[from]
        source: serde_json::Error,
    },

    #[error("operation failed: {source}")]
    Operation {
        #[from]
        source: anyhow::Error,
    },
}

impl CatalogError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Whether the failure was caused by the request rather than the store.
    /// A transport collaborator maps client errors to 4xx-style responses.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Operation { .. })
    }

    /// Translate a store failure, turning a uniqueness-constraint violation
    /// into a `Conflict`. The application-level duplicate pre-check is only a
    /// fast path; the store constraint is the authoritative guard.
    pub fn from_store_error(err: anyhow::Error, what: &str) -> Self {
        if let Some(sqlx::Error::Database(db)) = err.downcast_ref::<sqlx::Error>() {
            if db.is_unique_violation() {
                return Self::conflict(format!("{what} with the same name already exists"));
            }
        }
        Self::Operation { source: err }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
