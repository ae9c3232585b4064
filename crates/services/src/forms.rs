//! The numeric form boundary.
//!
//! Forms hold raw strings exactly as typed; conversion to domain values
//! happens only at save time, and a rejected save leaves the strings
//! untouched so the user can correct and re-submit. This is the only place
//! input "validation" lives, and it is deliberately just parsing with a
//! zero default — the core assumes numbers and never re-checks.

use staircase_core::aggregate::MergedStepView;
use staircase_core::model::{FinancialProfile, ProgressPatch, UserId};

/// Parse an amount field, defaulting anything unparseable to 0.
///
/// Empty input, garbage, and non-finite values all read as 0 — "no amount
/// entered" rather than an error.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Edit state for one step's detail form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepForm {
    pub current_amount: String,
    pub target_amount: String,
    pub completed: bool,
    pub notes: String,
}

impl StepForm {
    /// Prefill from the merged view, amounts rendered as plain numbers.
    #[must_use]
    pub fn from_view(view: &MergedStepView) -> Self {
        Self {
            current_amount: view.current_amount.to_string(),
            target_amount: view.target_amount.to_string(),
            completed: view.completed,
            notes: view.notes.clone(),
        }
    }

    /// Convert to a save patch. The detail form edits every field, so all
    /// four go into the upsert.
    #[must_use]
    pub fn to_patch(&self) -> ProgressPatch {
        ProgressPatch {
            current_amount: Some(parse_amount(&self.current_amount)),
            target_amount: Some(parse_amount(&self.target_amount)),
            completed: Some(self.completed),
            notes: Some(self.notes.clone()),
        }
    }

    /// Live percentage preview while the user types.
    ///
    /// Tracks the amount fields only — the completed toggle is shown
    /// separately on the form and does not force the preview to 100.
    #[must_use]
    pub fn preview_percent(&self) -> f64 {
        let current = parse_amount(&self.current_amount);
        let target = parse_amount(&self.target_amount);
        if target == 0.0 {
            return 0.0;
        }
        (current / target * 100.0).min(100.0)
    }
}

/// Edit state for the financial profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub monthly_income: String,
    pub monthly_expenses: String,
    pub current_savings: String,
    pub financial_goals: String,
}

impl ProfileForm {
    /// Prefill from a stored (or blank) profile.
    #[must_use]
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        Self {
            monthly_income: profile.monthly_income.to_string(),
            monthly_expenses: profile.monthly_expenses.to_string(),
            current_savings: profile.current_savings.to_string(),
            financial_goals: profile.financial_goals.clone(),
        }
    }

    /// Convert to the whole-record profile the save replaces.
    #[must_use]
    pub fn to_profile(&self, user_id: UserId) -> FinancialProfile {
        FinancialProfile {
            user_id,
            monthly_income: parse_amount(&self.monthly_income),
            monthly_expenses: parse_amount(&self.monthly_expenses),
            current_savings: parse_amount(&self.current_savings),
            financial_goals: self.financial_goals.clone(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staircase_core::model::StepId;
    use uuid::Uuid;

    #[test]
    fn parse_amount_defaults_garbage_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount(" 1250.5 "), 1250.5);
        assert_eq!(parse_amount("-40"), -40.0);
    }

    fn view() -> MergedStepView {
        MergedStepView {
            step_id: StepId::new(1),
            title: "Save $1,000".into(),
            description: String::new(),
            icon: "💰".into(),
            color_tag: "blue".into(),
            current_amount: 250.0,
            target_amount: 1000.0,
            completed: false,
            notes: "weekly transfer".into(),
        }
    }

    #[test]
    fn step_form_prefills_and_patches_every_field() {
        let form = StepForm::from_view(&view());
        assert_eq!(form.current_amount, "250");
        assert_eq!(form.target_amount, "1000");
        assert_eq!(form.notes, "weekly transfer");

        let patch = form.to_patch();
        assert_eq!(patch.current_amount, Some(250.0));
        assert_eq!(patch.target_amount, Some(1000.0));
        assert_eq!(patch.completed, Some(false));
        assert_eq!(patch.notes, Some("weekly transfer".into()));
    }

    #[test]
    fn step_form_garbage_amounts_save_as_zero() {
        let mut form = StepForm::from_view(&view());
        form.current_amount = "a lot".into();

        let patch = form.to_patch();
        assert_eq!(patch.current_amount, Some(0.0));
        assert_eq!(patch.target_amount, Some(1000.0));
    }

    #[test]
    fn preview_tracks_amounts_not_the_completed_toggle() {
        let mut form = StepForm::from_view(&view());
        assert_eq!(form.preview_percent(), 25.0);

        form.completed = true;
        assert_eq!(form.preview_percent(), 25.0);

        form.current_amount = "2000".into();
        assert_eq!(form.preview_percent(), 100.0);

        form.target_amount = "0".into();
        assert_eq!(form.preview_percent(), 0.0);
    }

    #[test]
    fn profile_form_round_trips() {
        let user = UserId::new(Uuid::new_v4());
        let mut profile = FinancialProfile::empty(user);
        profile.monthly_income = 5000.0;
        profile.monthly_expenses = 3500.0;
        profile.financial_goals = "freedom".into();

        let form = ProfileForm::from_profile(&profile);
        let back = form.to_profile(user);

        assert_eq!(back.monthly_income, 5000.0);
        assert_eq!(back.monthly_expenses, 3500.0);
        assert_eq!(back.financial_goals, "freedom");
        assert_eq!(back.user_id, user);
    }
}
