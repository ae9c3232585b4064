use async_trait::async_trait;
use chrono::{DateTime, Utc};
use staircase_core::model::{FinancialProfile, ProgressPatch, ProgressRecord, StepId, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// A failed fetch is distinct from an empty successful one: repositories
/// return `Ok` with an empty list (or `Ok(None)`) for "no rows yet", and an
/// error only when the store itself could not be reached or answered badly.
/// Callers must never conflate the two.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Repository contract for per-step progress rows.
///
/// The store owns the `(user_id, step_id)` uniqueness discipline; writes are
/// upserts that merge partial patches with whatever is already stored.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch every progress row for a user, in ascending step order.
    ///
    /// A user with no rows yet yields an empty vec, not an error. Adapters
    /// must hand back at most one row per step id (keep-last on duplicates).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the store cannot be reached or a row
    /// cannot be decoded.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError>;

    /// Upsert one step's row, merging the patch with stored state.
    ///
    /// Creates the row on first write; fields the patch leaves unset keep
    /// their stored values. `now` becomes the row's `updated_at`. Returns
    /// the row as the store now holds it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails. On failure nothing is
    /// written, so the caller's in-progress edit stays re-submittable.
    async fn upsert(
        &self,
        user_id: &UserId,
        step_id: StepId,
        patch: &ProgressPatch,
        now: DateTime<Utc>,
    ) -> Result<ProgressRecord, StorageError>;
}

/// Repository contract for the one-per-user financial profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the user's profile, `None` when they have not saved one yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the store cannot be reached or the row
    /// cannot be decoded.
    async fn get_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<FinancialProfile>, StorageError>;

    /// Replace the user's profile whole (no partial-field contract here).
    ///
    /// Returns the profile as stored, with `updated_at` stamped from `now`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails.
    async fn put_profile(
        &self,
        profile: &FinancialProfile,
        now: DateTime<Utc>,
    ) -> Result<FinancialProfile, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<(UserId, StepId), ProgressRecord>>>,
    profiles: Arc<Mutex<HashMap<UserId, FinancialProfile>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(HashMap::new())),
            profiles: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<ProgressRecord> = guard
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|(_, record)| record.clone())
            .collect();
        rows.sort_by_key(|r| r.step_id);
        Ok(rows)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        step_id: StepId,
        patch: &ProgressPatch,
        now: DateTime<Utc>,
    ) -> Result<ProgressRecord, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let record = guard
            .entry((*user_id, step_id))
            .or_insert_with(|| ProgressPatch::default().into_record(*user_id, step_id));
        patch.apply_to(record);
        record.updated_at = Some(now);
        Ok(record.clone())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<FinancialProfile>, StorageError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    async fn put_profile(
        &self,
        profile: &FinancialProfile,
        now: DateTime<Utc>,
    ) -> Result<FinancialProfile, StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut stored = profile.clone();
        stored.updated_at = Some(now);
        guard.insert(stored.user_id, stored.clone());
        Ok(stored)
    }
}

/// Aggregates the two repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { progress, profiles }
    }
}
