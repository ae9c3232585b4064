//! The fixed seven-step milestone catalog.
//!
//! The catalog is static data: exactly seven entries with ids 1..=7 in
//! ascending order, never mutated and never reordered at runtime. Everything
//! else in the crate merges user state *onto* this table.

use crate::model::{StepDefinition, StepId};

/// Number of steps in the staircase. Fixed by the program, not configurable.
pub const STEP_COUNT: usize = 7;

/// The immutable milestone table.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
}

impl StepCatalog {
    /// Builds the standard seven-step staircase.
    ///
    /// Steps 2, 4, 6 and 7 are boolean-complete milestones with no numeric
    /// goal. Steps 3 and 5 have a numeric goal whose target starts unset
    /// (zero) until the user supplies one.
    #[must_use]
    pub fn standard() -> Self {
        let step = |id: u8, title: &str, description: &str, target, icon: &str, color: &str| {
            StepDefinition {
                id: StepId::new(id),
                title: title.to_owned(),
                description: description.to_owned(),
                default_target: target,
                icon: icon.to_owned(),
                color_tag: color.to_owned(),
            }
        };

        Self {
            steps: vec![
                step(
                    1,
                    "Save $1,000",
                    "The first move toward a healthy financial life: put aside \
                     $1,000 as a starter buffer.",
                    Some(1000.0),
                    "💰",
                    "blue",
                ),
                step(
                    2,
                    "Pay Off Consumer Debt",
                    "Clear all consumer debt: credit cards, personal loans and \
                     vehicle installments.",
                    None,
                    "💳",
                    "red",
                ),
                step(
                    3,
                    "3-6 Month Emergency Fund",
                    "Build an emergency fund covering 3-6 months of expenses \
                     for the unexpected.",
                    Some(0.0),
                    "🛡️",
                    "green",
                ),
                step(
                    4,
                    "Invest for the Future",
                    "Start investing 15% of gross income to build long-term \
                     wealth.",
                    None,
                    "📈",
                    "purple",
                ),
                step(
                    5,
                    "Children's Education Fund",
                    "Set money aside for the children's education, college \
                     costs included.",
                    Some(0.0),
                    "🎓",
                    "yellow",
                ),
                step(
                    6,
                    "Pay Off the House",
                    "Retire the mortgage and own the roof over your head \
                     outright.",
                    None,
                    "🏠",
                    "indigo",
                ),
                step(
                    7,
                    "Give and Help Others",
                    "With financial freedom reached, share it: help others get \
                     to the same place.",
                    None,
                    "🤝",
                    "pink",
                ),
            ],
        }
    }

    /// Looks up a step definition by id.
    ///
    /// Returns `None` for ids outside 1..=7 — callers handle absence
    /// explicitly (a detail view for an unknown step is a "not found" case,
    /// not a crash).
    #[must_use]
    pub fn get(&self, id: StepId) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Iterates the steps in canonical ascending-id order.
    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    /// Number of steps; always [`STEP_COUNT`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
