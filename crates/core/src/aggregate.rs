use serde::{Deserialize, Serialize};

use crate::catalog::StepCatalog;
use crate::model::{ProgressRecord, StepId};

//
// ─── MERGED VIEW ───────────────────────────────────────────────────────────────
//

/// Display-ready union of a catalog step and the user's stored record.
///
/// Derived and ephemeral: recomputed on every read, never persisted. Record
/// values override catalog defaults; a missing record reads as "not yet
/// started" (zero amounts, not completed, empty notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedStepView {
    pub step_id: StepId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_tag: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub completed: bool,
    pub notes: String,
}

impl MergedStepView {
    /// Completion percentage for this step.
    ///
    /// The manual `completed` flag short-circuits *before* the amount ratio:
    /// a step marked done at 0/0 amounts reads as 100%. Otherwise a zero
    /// target or zero current amount reads as 0% (no data yet, and no
    /// division by zero), and the ratio is clamped so an over-target amount
    /// never shows above 100.
    ///
    /// # Examples
    ///
    /// ```
    /// # use staircase_core::{StepCatalog, merge_progress};
    /// let views = merge_progress(&StepCatalog::standard(), &[]);
    /// assert_eq!(views[0].progress_percent(), 0.0);
    /// ```
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        if self.target_amount == 0.0 || self.current_amount == 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }
}

/// Merge a user's stored records onto the catalog.
///
/// Pure and total: the output always has exactly one entry per catalog step,
/// in the catalog's ascending-id order, no matter how many records come in
/// (zero to seven). Absent records are valid, not a failure.
///
/// Callers own freshness: re-fetch the record set after every successful
/// write before merging again — this function holds no state and caches
/// nothing.
#[must_use]
pub fn merge_progress(catalog: &StepCatalog, records: &[ProgressRecord]) -> Vec<MergedStepView> {
    catalog
        .iter()
        .map(|step| {
            let record = records.iter().find(|r| r.step_id == step.id);
            match record {
                Some(record) => MergedStepView {
                    step_id: step.id,
                    title: step.title.clone(),
                    description: step.description.clone(),
                    icon: step.icon.clone(),
                    color_tag: step.color_tag.clone(),
                    current_amount: record.current_amount,
                    target_amount: record.target_amount,
                    completed: record.completed,
                    notes: record.notes.clone(),
                },
                None => MergedStepView {
                    step_id: step.id,
                    title: step.title.clone(),
                    description: step.description.clone(),
                    icon: step.icon.clone(),
                    color_tag: step.color_tag.clone(),
                    current_amount: 0.0,
                    target_amount: step.default_target.unwrap_or(0.0),
                    completed: false,
                    notes: String::new(),
                },
            }
        })
        .collect()
}

//
// ─── SUMMARY STATISTICS ────────────────────────────────────────────────────────
//

/// Dashboard summary derived from a merged view set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub completed_count: usize,
    pub remaining_steps: usize,
    /// Fraction of steps *flagged complete*, as a percentage — not an
    /// average of per-step ratios. A step sitting at 80% of its target but
    /// not flagged complete contributes nothing here.
    pub overall_percent: f64,
    /// Sum of `current_amount` across all steps.
    pub total_savings: f64,
}

/// Derive the dashboard statistics from a merged view set.
#[must_use]
pub fn aggregate_stats(views: &[MergedStepView]) -> ProgressStats {
    let total = views.len();
    let completed_count = views.iter().filter(|v| v.completed).count();
    let overall_percent = if total == 0 {
        0.0
    } else {
        completed_count as f64 / total as f64 * 100.0
    };
    let total_savings = views.iter().map(|v| v.current_amount).sum();

    ProgressStats {
        completed_count,
        remaining_steps: total - completed_count,
        overall_percent,
        total_savings,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProgressPatch, UserId};
    use uuid::Uuid;

    fn record(step: u8, current: f64, target: f64, completed: bool) -> ProgressRecord {
        ProgressRecord {
            user_id: UserId::new(Uuid::nil()),
            step_id: StepId::new(step),
            current_amount: current,
            target_amount: target,
            completed,
            notes: String::new(),
            updated_at: None,
        }
    }

    fn view(current: f64, target: f64, completed: bool) -> MergedStepView {
        MergedStepView {
            step_id: StepId::new(1),
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            color_tag: String::new(),
            current_amount: current,
            target_amount: target,
            completed,
            notes: String::new(),
        }
    }

    #[test]
    fn merge_with_no_records_yields_seven_defaults() {
        let catalog = StepCatalog::standard();
        let views = merge_progress(&catalog, &[]);

        assert_eq!(views.len(), 7);
        let ids: Vec<u8> = views.iter().map(|v| v.step_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        for v in &views {
            assert_eq!(v.current_amount, 0.0);
            assert!(!v.completed);
            assert!(v.notes.is_empty());
        }
        // Catalog default target survives for the starter-savings step.
        assert_eq!(views[0].target_amount, 1000.0);
        // Boolean-complete milestones merge to a zero target.
        assert_eq!(views[1].target_amount, 0.0);
    }

    #[test]
    fn merge_with_partial_records_keeps_order_and_count() {
        let catalog = StepCatalog::standard();
        // Deliberately out of order.
        let records = vec![
            record(5, 200.0, 4000.0, false),
            record(1, 1000.0, 1000.0, true),
            record(3, 1500.0, 9000.0, false),
        ];

        let views = merge_progress(&catalog, &records);

        assert_eq!(views.len(), 7);
        let ids: Vec<u8> = views.iter().map(|v| v.step_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        assert!(views[0].completed);
        assert_eq!(views[2].current_amount, 1500.0);
        assert_eq!(views[4].target_amount, 4000.0);
        // Untouched steps read as not started.
        assert!(!views[1].completed);
        assert_eq!(views[6].current_amount, 0.0);
    }

    #[test]
    fn merge_record_values_override_catalog_defaults() {
        let catalog = StepCatalog::standard();
        let records = vec![record(1, 50.0, 2000.0, false)];

        let views = merge_progress(&catalog, &records);

        // The record's target wins over the catalog's 1000.
        assert_eq!(views[0].target_amount, 2000.0);
        assert_eq!(views[0].current_amount, 50.0);
    }

    #[test]
    fn merge_is_idempotent_over_unchanged_input() {
        let catalog = StepCatalog::standard();
        let records = vec![record(2, 0.0, 0.0, true), record(4, 10.0, 40.0, false)];

        let first = merge_progress(&catalog, &records);
        let second = merge_progress(&catalog, &records);

        assert_eq!(first, second);
    }

    #[test]
    fn completed_flag_always_reads_one_hundred_percent() {
        assert_eq!(view(0.0, 0.0, true).progress_percent(), 100.0);
        assert_eq!(view(5.0, 1000.0, true).progress_percent(), 100.0);
        assert_eq!(view(9999.0, 1.0, true).progress_percent(), 100.0);
    }

    #[test]
    fn zero_target_or_zero_current_reads_zero_percent() {
        assert_eq!(view(500.0, 0.0, false).progress_percent(), 0.0);
        assert_eq!(view(0.0, 1000.0, false).progress_percent(), 0.0);
    }

    #[test]
    fn ratio_is_clamped_at_one_hundred() {
        assert_eq!(view(150.0, 100.0, false).progress_percent(), 100.0);
    }

    #[test]
    fn ratio_under_target_is_exact() {
        assert_eq!(view(50.0, 200.0, false).progress_percent(), 25.0);
    }

    #[test]
    fn stats_count_completion_flags_not_ratios() {
        let catalog = StepCatalog::standard();
        // One step nearly there by ratio but not flagged; two flagged done.
        let records = vec![
            record(1, 800.0, 1000.0, false),
            record(2, 0.0, 0.0, true),
            record(6, 0.0, 0.0, true),
        ];
        let views = merge_progress(&catalog, &records);

        let stats = aggregate_stats(&views);

        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.remaining_steps, 5);
        assert!((stats.overall_percent - 2.0 / 7.0 * 100.0).abs() < 1e-9);
        assert_eq!(stats.total_savings, 800.0);
    }

    #[test]
    fn stats_sum_savings_across_all_steps() {
        let catalog = StepCatalog::standard();
        let records = vec![
            record(1, 1000.0, 1000.0, true),
            record(3, 2500.0, 9000.0, false),
            record(5, 500.0, 0.0, false),
        ];
        let views = merge_progress(&catalog, &records);

        assert_eq!(aggregate_stats(&views).total_savings, 4000.0);
    }

    #[test]
    fn patch_then_merge_round_trip() {
        let catalog = StepCatalog::standard();
        let user = UserId::new(Uuid::new_v4());
        let record = ProgressPatch {
            current_amount: Some(300.0),
            target_amount: Some(1000.0),
            ..ProgressPatch::default()
        }
        .into_record(user, StepId::new(1));

        let views = merge_progress(&catalog, &[record]);

        assert_eq!(views[0].progress_percent(), 30.0);
    }
}
