use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staircase_core::model::{FinancialProfile, ProgressPatch, ProgressRecord, StepId, UserId};
use uuid::Uuid;

/// Wire shape of one `user_progress` row as the store returns it.
///
/// Column names follow the hosted schema. Amount columns may come back
/// absent or null on rows written by older clients; those read as 0.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProgressRow {
    pub user_id: Uuid,
    pub step_id: u8,
    #[serde(default)]
    pub current_amount: Option<f64>,
    #[serde(default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressRow {
    pub(crate) fn into_record(self) -> ProgressRecord {
        ProgressRecord {
            user_id: UserId::new(self.user_id),
            step_id: StepId::new(self.step_id),
            current_amount: self.current_amount.unwrap_or(0.0),
            target_amount: self.target_amount.unwrap_or(0.0),
            completed: self.completed,
            notes: self.notes.unwrap_or_default(),
            updated_at: self.updated_at,
        }
    }
}

/// Upsert body for `user_progress`: the key plus only the fields the patch
/// actually sets, so the store merges rather than overwrites.
#[derive(Debug, Serialize)]
pub(crate) struct ProgressUpsertRow {
    pub user_id: Uuid,
    pub step_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressUpsertRow {
    pub(crate) fn new(
        user_id: &UserId,
        step_id: StepId,
        patch: &ProgressPatch,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.value(),
            step_id: step_id.value(),
            current_amount: patch.current_amount,
            target_amount: patch.target_amount,
            completed: patch.completed,
            notes: patch.notes.clone(),
            updated_at: now,
        }
    }
}

/// Wire shape of the single `profiles` row per user.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub current_savings: Option<f64>,
    #[serde(default)]
    pub financial_goals: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRow {
    pub(crate) fn into_profile(self) -> FinancialProfile {
        FinancialProfile {
            user_id: UserId::new(self.user_id),
            monthly_income: self.monthly_income.unwrap_or(0.0),
            monthly_expenses: self.monthly_expenses.unwrap_or(0.0),
            current_savings: self.current_savings.unwrap_or(0.0),
            financial_goals: self.financial_goals.unwrap_or_default(),
            updated_at: self.updated_at,
        }
    }
}

/// Upsert body for `profiles`: the record is replaced whole, so every field
/// goes on the wire.
#[derive(Debug, Serialize)]
pub(crate) struct ProfileUpsertRow {
    pub user_id: Uuid,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub financial_goals: String,
    pub updated_at: DateTime<Utc>,
}

impl ProfileUpsertRow {
    pub(crate) fn from_profile(profile: &FinancialProfile, now: DateTime<Utc>) -> Self {
        Self {
            user_id: profile.user_id.value(),
            monthly_income: profile.monthly_income,
            monthly_expenses: profile.monthly_expenses,
            current_savings: profile.current_savings,
            financial_goals: profile.financial_goals.clone(),
            updated_at: now,
        }
    }
}

/// Collapse duplicate rows per step id, keeping the last one the store sent.
///
/// Uniqueness per `(user, step)` is the store's invariant; if it is ever
/// violated we repair it here so the aggregator upstream can rely on it.
/// Output is sorted by ascending step id.
pub(crate) fn dedupe_keep_last(rows: Vec<ProgressRecord>) -> Vec<ProgressRecord> {
    let mut by_step: Vec<ProgressRecord> = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(existing) = by_step.iter_mut().find(|r| r.step_id == row.step_id) {
            *existing = row;
        } else {
            by_step.push(row);
        }
    }
    by_step.sort_by_key(|r| r.step_id);
    by_step
}
