use std::sync::Arc;

use staircase_core::Clock;
use staircase_core::aggregate::{MergedStepView, ProgressStats, aggregate_stats, merge_progress};
use staircase_core::catalog::StepCatalog;
use staircase_core::model::{ProgressPatch, ProgressRecord, StepId, UserId};
use storage::repository::ProgressRepository;
use tracing::debug;

use crate::error::ProgressServiceError;

/// Orchestrates progress reads and writes for the step views.
///
/// Stateless between calls: every read re-fetches the user's rows and
/// re-runs the merge, so a read always reflects the latest completed write.
/// Callers that want to cache should go through `ProgressSession`, which
/// owns invalidation.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    catalog: StepCatalog,
    progress: Arc<dyn ProgressRepository>,
}

/// Everything the dashboard needs for one user: the seven merged step views
/// plus the derived summary numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOverview {
    pub steps: Vec<MergedStepView>,
    pub stats: ProgressStats,
}

/// Detail context for a single step ("step N of 7").
#[derive(Debug, Clone, PartialEq)]
pub struct StepDetailView {
    pub step: MergedStepView,
    pub step_number: u8,
    pub total_steps: usize,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, catalog: StepCatalog, progress: Arc<dyn ProgressRepository>) -> Self {
        Self {
            clock,
            catalog,
            progress,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    /// Fetch the user's rows and derive the dashboard view.
    ///
    /// A user with no rows yet gets the seven catalog defaults — that is a
    /// successful, empty read, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when the store cannot be
    /// read; callers show an error state rather than defaults.
    pub async fn overview(
        &self,
        user_id: &UserId,
    ) -> Result<ProgressOverview, ProgressServiceError> {
        let records = self.progress.list_for_user(user_id).await?;
        debug!(%user_id, rows = records.len(), "merging progress");
        let steps = merge_progress(&self.catalog, &records);
        let stats = aggregate_stats(&steps);
        Ok(ProgressOverview { steps, stats })
    }

    /// Build the detail view for one step.
    ///
    /// An id outside the catalog yields `Ok(None)` — the "not found"
    /// navigation case, handled by the caller, never a panic.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the user's rows cannot be
    /// fetched.
    pub async fn step_detail(
        &self,
        user_id: &UserId,
        step_id: StepId,
    ) -> Result<Option<StepDetailView>, ProgressServiceError> {
        if self.catalog.get(step_id).is_none() {
            return Ok(None);
        }

        let overview = self.overview(user_id).await?;
        let step = overview
            .steps
            .into_iter()
            .find(|view| view.step_id == step_id);
        Ok(step.map(|step| StepDetailView {
            step,
            step_number: step_id.value(),
            total_steps: self.catalog.len(),
        }))
    }

    /// Upsert one step's progress.
    ///
    /// The patch merges with whatever the store already holds; the returned
    /// record is the stored row. Reads made before this call are stale —
    /// re-fetch (or let `ProgressSession` invalidate) before merging again.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails; the
    /// store is unchanged in that case and the edit can be re-submitted.
    pub async fn save_step(
        &self,
        user_id: &UserId,
        step_id: StepId,
        patch: &ProgressPatch,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let now = self.clock.now();
        debug!(%user_id, %step_id, "saving step progress");
        let record = self.progress.upsert(user_id, step_id, patch, now).await?;
        Ok(record)
    }
}
