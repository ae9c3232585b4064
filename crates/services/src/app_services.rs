use std::sync::Arc;

use staircase_core::Clock;
use staircase_core::catalog::StepCatalog;
use staircase_core::model::UserId;
use storage::repository::Storage;
use storage::rest::{AuthClient, AuthSession, RestConfig};

use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;
use crate::session::ProgressSession;

/// Assembles the app-facing services over a chosen storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    profiles: Arc<ProfileService>,
}

impl AppServices {
    /// Build services over any storage bundle.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            StepCatalog::standard(),
            Arc::clone(&storage.progress),
        ));
        let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));
        Self { progress, profiles }
    }

    /// Build services over the in-memory backend (tests, prototyping).
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    /// Build services over the hosted store for a signed-in session.
    #[must_use]
    pub fn rest(config: RestConfig, session: &AuthSession, clock: Clock) -> Self {
        Self::from_storage(&Storage::rest(config, session), clock)
    }

    /// Sign in against the hosted store configured in the environment and
    /// build services for the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::MissingConfig` when the environment holds
    /// no store configuration, and `AppServicesError::Storage` when sign-in
    /// fails.
    pub async fn sign_in_from_env(
        email: &str,
        password: &str,
        clock: Clock,
    ) -> Result<(Self, AuthSession), AppServicesError> {
        let config = RestConfig::from_env().ok_or(AppServicesError::MissingConfig)?;
        let session = AuthClient::new(config.clone())
            .sign_in_with_password(email, password)
            .await?;
        Ok((Self::rest(config, &session, clock), session))
    }

    /// A progress session scoped to one signed-in user.
    #[must_use]
    pub fn session_for(&self, user_id: UserId) -> ProgressSession {
        ProgressSession::new((*self.progress).clone(), user_id)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }
}
