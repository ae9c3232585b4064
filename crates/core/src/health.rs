use serde::{Deserialize, Serialize};

use crate::model::FinancialProfile;

/// Binary classification of a profile's monthly balance.
///
/// Keyed on the *sign* of net monthly income, not a score: anything left
/// over after expenses is `Healthy`, break-even or worse is
/// `NeedsImprovement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Healthy,
    NeedsImprovement,
}

/// Metrics derived from a financial profile. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    /// Income minus expenses; may be negative.
    pub net_monthly_income: f64,
    /// Net income as a percentage of income; 0 when income is 0.
    pub savings_rate: f64,
    pub label: HealthLabel,
}

/// Derive net income, savings rate and the health label from a profile.
///
/// Total over any numeric input: a zero income yields a savings rate of 0
/// rather than a division by zero.
#[must_use]
pub fn financial_health(profile: &FinancialProfile) -> FinancialHealth {
    let net_monthly_income = profile.monthly_income - profile.monthly_expenses;
    let savings_rate = if profile.monthly_income > 0.0 {
        net_monthly_income / profile.monthly_income * 100.0
    } else {
        0.0
    };
    let label = if net_monthly_income > 0.0 {
        HealthLabel::Healthy
    } else {
        HealthLabel::NeedsImprovement
    };

    FinancialHealth {
        net_monthly_income,
        savings_rate,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use uuid::Uuid;

    fn profile(income: f64, expenses: f64) -> FinancialProfile {
        FinancialProfile {
            monthly_income: income,
            monthly_expenses: expenses,
            ..FinancialProfile::empty(UserId::new(Uuid::nil()))
        }
    }

    #[test]
    fn positive_net_income_is_healthy() {
        let health = financial_health(&profile(5000.0, 3500.0));

        assert_eq!(health.net_monthly_income, 1500.0);
        assert_eq!(health.savings_rate, 30.0);
        assert_eq!(health.label, HealthLabel::Healthy);
    }

    #[test]
    fn zero_income_has_zero_savings_rate() {
        let health = financial_health(&profile(0.0, 1200.0));

        assert_eq!(health.net_monthly_income, -1200.0);
        assert_eq!(health.savings_rate, 0.0);
        assert_eq!(health.label, HealthLabel::NeedsImprovement);
    }

    #[test]
    fn break_even_needs_improvement() {
        let health = financial_health(&profile(3000.0, 3000.0));

        assert_eq!(health.net_monthly_income, 0.0);
        assert_eq!(health.savings_rate, 0.0);
        assert_eq!(health.label, HealthLabel::NeedsImprovement);
    }

    #[test]
    fn overspending_yields_negative_rate() {
        let health = financial_health(&profile(4000.0, 5000.0));

        assert_eq!(health.net_monthly_income, -1000.0);
        assert_eq!(health.savings_rate, -25.0);
        assert_eq!(health.label, HealthLabel::NeedsImprovement);
    }
}
