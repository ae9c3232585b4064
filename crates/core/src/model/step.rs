use serde::{Deserialize, Serialize};

use crate::model::ids::StepId;

/// One of the seven milestone definitions supplied by the catalog.
///
/// Step definitions are born with process start and never change at runtime.
/// `default_target` is `None` for milestones that are boolean-complete (debt
/// payoff, investing rhythm) and `Some(0.0)` where a numeric target exists
/// but has not been set by the user yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: String,
    pub description: String,
    pub default_target: Option<f64>,
    /// Presentation hint, e.g. an emoji glyph.
    pub icon: String,
    /// Presentation hint, a named accent color.
    pub color_tag: String,
}

impl StepDefinition {
    /// Returns true when this milestone tracks a numeric amount at all.
    #[must_use]
    pub fn has_numeric_goal(&self) -> bool {
        self.default_target.is_some()
    }
}
