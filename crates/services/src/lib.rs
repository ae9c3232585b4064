#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod forms;
pub mod profile_service;
pub mod progress_service;
pub mod session;

pub use staircase_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProfileServiceError, ProgressServiceError};
pub use forms::{ProfileForm, StepForm, parse_amount};
pub use profile_service::ProfileService;
pub use progress_service::{ProgressOverview, ProgressService, StepDetailView};
pub use session::ProgressSession;
