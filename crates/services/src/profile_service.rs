use std::sync::Arc;

use staircase_core::Clock;
use staircase_core::health::{FinancialHealth, financial_health};
use staircase_core::model::{FinancialProfile, UserId};
use storage::repository::ProfileRepository;
use tracing::debug;

use crate::error::ProfileServiceError;

/// Thin facade over the one-per-user profile row.
///
/// Profiles are fetched whole and replaced whole; there is no partial-field
/// contract here, unlike progress rows.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// Load the user's profile, `None` when none has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` when the store cannot be read
    /// — distinct from the successful-but-absent case.
    pub async fn load(
        &self,
        user_id: &UserId,
    ) -> Result<Option<FinancialProfile>, ProfileServiceError> {
        let profile = self.profiles.get_profile(user_id).await?;
        Ok(profile)
    }

    /// Load the profile, or a blank one for prefilling an empty form.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` when the store cannot be read.
    pub async fn load_or_empty(
        &self,
        user_id: &UserId,
    ) -> Result<FinancialProfile, ProfileServiceError> {
        Ok(self
            .load(user_id)
            .await?
            .unwrap_or_else(|| FinancialProfile::empty(*user_id)))
    }

    /// Replace the stored profile with this one.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if persistence fails; the
    /// caller's form keeps its contents and can re-submit.
    pub async fn save(
        &self,
        profile: &FinancialProfile,
    ) -> Result<FinancialProfile, ProfileServiceError> {
        let now = self.clock.now();
        debug!(user_id = %profile.user_id, "saving profile");
        let stored = self.profiles.put_profile(profile, now).await?;
        Ok(stored)
    }

    /// Derived health metrics for a profile. Pure; nothing is stored.
    #[must_use]
    pub fn health(&self, profile: &FinancialProfile) -> FinancialHealth {
        financial_health(profile)
    }
}
