//! Error types for registry access and reconciliation.

use thiserror::Error;

/// Errors a registry backend reports.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The backend could not be reached or queried.
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write.
    #[error("registry rejected request: {0}")]
    Rejected(String),

    /// Backend-specific failure.
    #[error("registry backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by preview and apply.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Looking up existing entities failed.
    #[error("failed to look up existing {entity}: {source}")]
    LookupFailure {
        entity: &'static str,
        #[source]
        source: RegistryError,
    },

    /// Creating an entity or link failed; remaining work was aborted.
    #[error("failed to create {entity} '{name}': {source}")]
    CreationFailure {
        entity: &'static str,
        name: String,
        #[source]
        source: RegistryError,
    },
}

impl ReconcileError {
    pub(crate) fn lookup(entity: &'static str) -> impl FnOnce(RegistryError) -> Self {
        move |source| Self::LookupFailure { entity, source }
    }

    pub(crate) fn creation(
        entity: &'static str,
        name: impl Into<String>,
    ) -> impl FnOnce(RegistryError) -> Self {
        let name = name.into();
        move |source| Self::CreationFailure {
            entity,
            name,
            source,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
