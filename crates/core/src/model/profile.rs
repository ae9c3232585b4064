use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// A user's financial profile: at most one per user, fetched whole and
/// replaced whole on save (no partial-field upsert, unlike progress rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub user_id: UserId,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub financial_goals: String,
    /// Stamped on write; `None` until the first round-trip.
    pub updated_at: Option<DateTime<Utc>>,
}

impl FinancialProfile {
    /// A blank profile for a user who has not filled anything in yet.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            current_savings: 0.0,
            financial_goals: String::new(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn empty_profile_is_all_zeroes() {
        let user = UserId::new(Uuid::new_v4());
        let profile = FinancialProfile::empty(user);

        assert_eq!(profile.user_id, user);
        assert_eq!(profile.monthly_income, 0.0);
        assert_eq!(profile.monthly_expenses, 0.0);
        assert_eq!(profile.current_savings, 0.0);
        assert!(profile.financial_goals.is_empty());
        assert_eq!(profile.updated_at, None);
    }
}
