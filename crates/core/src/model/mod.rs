mod ids;
mod profile;
mod progress;
mod step;

pub use ids::{ParseIdError, StepId, UserId};

pub use profile::FinancialProfile;
pub use progress::{ProgressPatch, ProgressRecord};
pub use step::StepDefinition;
