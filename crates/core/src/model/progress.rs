use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{StepId, UserId};

//
// ─── PROGRESS TYPES ────────────────────────────────────────────────────────────
//

/// A user's stored state for one step.
///
/// The remote store owns these rows and guarantees at most one per
/// `(user_id, step_id)`. Absence of a record means "not yet started", which
/// is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub step_id: StepId,
    pub current_amount: f64,
    pub target_amount: f64,
    /// Manual completion flag, independent of the amount fields. A step can
    /// be marked complete at 0/0 and must still read as done.
    pub completed: bool,
    pub notes: String,
    /// Stamped by the store on write; `None` until the first round-trip.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a progress record.
///
/// Saves are upserts keyed by `(user_id, step_id)`: fields left `None` here
/// must merge with, not replace, whatever the store already holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressPatch {
    pub current_amount: Option<f64>,
    pub target_amount: Option<f64>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

impl ProgressPatch {
    /// Returns true when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current_amount.is_none()
            && self.target_amount.is_none()
            && self.completed.is_none()
            && self.notes.is_none()
    }

    /// Merge the set fields into an existing record, leaving the rest intact.
    pub fn apply_to(&self, record: &mut ProgressRecord) {
        if let Some(current) = self.current_amount {
            record.current_amount = current;
        }
        if let Some(target) = self.target_amount {
            record.target_amount = target;
        }
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
        if let Some(notes) = &self.notes {
            record.notes = notes.clone();
        }
    }

    /// Materialize a first write for a step the user has not touched before.
    ///
    /// Unset fields take the not-yet-started defaults: zero amounts, not
    /// completed, empty notes.
    #[must_use]
    pub fn into_record(self, user_id: UserId, step_id: StepId) -> ProgressRecord {
        ProgressRecord {
            user_id,
            step_id,
            current_amount: self.current_amount.unwrap_or(0.0),
            target_amount: self.target_amount.unwrap_or(0.0),
            completed: self.completed.unwrap_or(false),
            notes: self.notes.unwrap_or_default(),
            updated_at: None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
