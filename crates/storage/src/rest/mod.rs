//! Adapter for the hosted row store.
//!
//! The backend speaks a PostgREST-style API: rows live in `user_progress`
//! and `profiles` tables reached over `/rest/v1`, with token-based auth on
//! `/auth/v1`. Progress writes are merge-upserts keyed by
//! `(user_id, step_id)`; profile writes replace the row whole. Concurrent
//! sessions race last-write-wins at the store; no concurrency token exists.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use staircase_core::model::{FinancialProfile, ProgressPatch, ProgressRecord, StepId, UserId};
use tracing::{debug, warn};
use url::Url;

use crate::repository::{ProfileRepository, ProgressRepository, Storage, StorageError};

mod auth;
mod rows;

pub use auth::{AuthClient, AuthSession};

use rows::{ProfileRow, ProfileUpsertRow, ProgressRow, ProgressUpsertRow, dedupe_keep_last};

/// Connection settings for the hosted store.
#[derive(Clone, Debug)]
pub struct RestConfig {
    pub base_url: Url,
    /// The project's public API key; doubles as the anonymous bearer token.
    pub api_key: String,
}

impl RestConfig {
    /// Build a config from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` when the base URL does not parse.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, StorageError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorageError::Connection(format!("invalid base url: {e}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Read `STAIRCASE_API_URL` / `STAIRCASE_API_KEY` from the environment.
    ///
    /// `None` when either is unset, empty, or unparseable — the caller falls
    /// back to another backend (typically in-memory) in that case.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("STAIRCASE_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("STAIRCASE_API_URL").ok()?;
        Self::new(&base_url, api_key).ok()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Repository over the hosted store's REST surface.
#[derive(Clone)]
pub struct RestRepository {
    client: Client,
    config: RestConfig,
    /// Bearer presented on data requests. Starts as the public key; a
    /// signed-in session swaps in the user's access token so row-level
    /// security applies.
    bearer: String,
}

impl RestRepository {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        let bearer = config.api_key.clone();
        Self {
            client: Client::new(),
            config,
            bearer,
        }
    }

    /// Adopt a signed-in session's access token for subsequent requests.
    #[must_use]
    pub fn with_session(mut self, session: &AuthSession) -> Self {
        self.bearer = session.access_token.clone();
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.config.endpoint(path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.config.endpoint(path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
    }
}

fn transport(e: reqwest::Error) -> StorageError {
    if e.is_decode() {
        StorageError::Serialization(e.to_string())
    } else {
        StorageError::Connection(e.to_string())
    }
}

fn check_status(status: StatusCode) -> Result<(), StorageError> {
    if status.is_success() {
        return Ok(());
    }
    warn!("store answered {status}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized),
        StatusCode::NOT_FOUND => Err(StorageError::NotFound),
        other => Err(StorageError::Status(other.as_u16())),
    }
}

#[async_trait]
impl ProgressRepository for RestRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        debug!(%user_id, "fetching progress rows");
        let response = self
            .get("rest/v1/user_progress")
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{user_id}")),
                ("order", "step_id".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        check_status(response.status())?;

        let rows: Vec<ProgressRow> = response.json().await.map_err(transport)?;
        let records = rows.into_iter().map(ProgressRow::into_record).collect();
        Ok(dedupe_keep_last(records))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        step_id: StepId,
        patch: &ProgressPatch,
        now: DateTime<Utc>,
    ) -> Result<ProgressRecord, StorageError> {
        debug!(%user_id, %step_id, "upserting progress row");
        let body = ProgressUpsertRow::new(user_id, step_id, patch, now);
        let response = self
            .post("rest/v1/user_progress")
            .query(&[("on_conflict", "user_id,step_id")])
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response.status())?;

        let mut rows: Vec<ProgressRow> = response.json().await.map_err(transport)?;
        let row = rows
            .pop()
            .ok_or_else(|| StorageError::Serialization("upsert returned no row".into()))?;
        Ok(row.into_record())
    }
}

#[async_trait]
impl ProfileRepository for RestRepository {
    async fn get_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<FinancialProfile>, StorageError> {
        debug!(%user_id, "fetching profile");
        let response = self
            .get("rest/v1/profiles")
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{user_id}")),
            ])
            .send()
            .await
            .map_err(transport)?;
        check_status(response.status())?;

        let mut rows: Vec<ProfileRow> = response.json().await.map_err(transport)?;
        Ok(rows.pop().map(ProfileRow::into_profile))
    }

    async fn put_profile(
        &self,
        profile: &FinancialProfile,
        now: DateTime<Utc>,
    ) -> Result<FinancialProfile, StorageError> {
        debug!(user_id = %profile.user_id, "saving profile");
        let body = ProfileUpsertRow::from_profile(profile, now);
        let response = self
            .post("rest/v1/profiles")
            .query(&[("on_conflict", "user_id")])
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response.status())?;

        let mut rows: Vec<ProfileRow> = response.json().await.map_err(transport)?;
        let row = rows
            .pop()
            .ok_or_else(|| StorageError::Serialization("upsert returned no row".into()))?;
        Ok(row.into_profile())
    }
}

impl Storage {
    /// Build a `Storage` backed by the hosted store.
    #[must_use]
    pub fn rest(config: RestConfig, session: &AuthSession) -> Self {
        let repo = RestRepository::new(config).with_session(session);
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { progress, profiles }
    }
}
