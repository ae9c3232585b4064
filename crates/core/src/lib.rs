#![forbid(unsafe_code)]

pub mod aggregate;
pub mod catalog;
pub mod health;
pub mod model;
pub mod time;

pub use time::Clock;

pub use aggregate::{MergedStepView, ProgressStats, aggregate_stats, merge_progress};
pub use catalog::StepCatalog;
pub use health::{FinancialHealth, HealthLabel, financial_health};
