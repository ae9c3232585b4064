use staircase_core::model::{ProgressPatch, ProgressRecord, StepId, UserId};
use tracing::debug;

use crate::error::ProgressServiceError;
use crate::progress_service::{ProgressOverview, ProgressService, StepDetailView};

/// Session-scoped controller for one signed-in user's progress.
///
/// Owns the fetch/cache lifecycle so the pure merge stays pure: reads serve
/// a cached overview when one is fresh, and every successful write drops the
/// cache so the next read re-fetches and re-merges. The cache is never
/// hand-patched after a write — that is how cache and store drift apart.
pub struct ProgressSession {
    user_id: UserId,
    service: ProgressService,
    cached: Option<ProgressOverview>,
}

impl ProgressSession {
    #[must_use]
    pub fn new(service: ProgressService, user_id: UserId) -> Self {
        Self {
            user_id,
            service,
            cached: None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current overview, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when a re-fetch fails. The
    /// stale cache is not served in that case: data-unavailable must stay
    /// distinguishable from data.
    pub async fn overview(&mut self) -> Result<ProgressOverview, ProgressServiceError> {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }
        let overview = self.service.overview(&self.user_id).await?;
        self.cached = Some(overview.clone());
        Ok(overview)
    }

    /// Detail view for one step, from the same cached overview.
    ///
    /// `Ok(None)` for ids outside the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when a re-fetch fails.
    pub async fn step_detail(
        &mut self,
        step_id: StepId,
    ) -> Result<Option<StepDetailView>, ProgressServiceError> {
        if self.service.catalog().get(step_id).is_none() {
            return Ok(None);
        }
        let overview = self.overview().await?;
        let total_steps = self.service.catalog().len();
        Ok(overview
            .steps
            .into_iter()
            .find(|view| view.step_id == step_id)
            .map(|step| StepDetailView {
                step,
                step_number: step_id.value(),
                total_steps,
            }))
    }

    /// Save one step and invalidate the cached overview.
    ///
    /// On failure the cache is left alone: nothing was written, so what it
    /// holds still matches the store, and the caller's edit stays
    /// re-submittable.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn save_step(
        &mut self,
        step_id: StepId,
        patch: &ProgressPatch,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let record = self.service.save_step(&self.user_id, step_id, patch).await?;
        debug!(user_id = %self.user_id, %step_id, "write succeeded, dropping cached overview");
        self.cached = None;
        Ok(record)
    }

    /// Drop the cache unconditionally, forcing the next read to re-fetch.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
