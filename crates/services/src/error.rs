//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `ProgressService` and `ProgressSession`.
///
/// A storage failure here means "data unavailable" — the caller shows an
/// error state and keeps any in-progress edit; it must not fall back to
/// computing defaults as if the user simply had no records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("hosted store is not configured")]
    MissingConfig,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
