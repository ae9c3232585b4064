use reqwest::Client;
use serde::Deserialize;
use staircase_core::model::UserId;
use tracing::debug;
use uuid::Uuid;

use super::RestConfig;
use crate::repository::StorageError;

/// A signed-in user as the identity provider reports it.
///
/// "No user" is simply the absence of a session — nothing downstream ever
/// looks inside the token.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user_id: UserId,
    pub access_token: String,
}

/// Thin client for the identity endpoint.
///
/// The provider itself is out of scope; this covers only the password
/// sign-in the application actually uses.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    config: RestConfig,
}

impl AuthClient {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unauthorized` for rejected credentials and
    /// `StorageError::Connection`/`Serialization` for transport failures.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, StorageError> {
        debug!("signing in");
        let response = self
            .client
            .post(self.config.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(StorageError::Unauthorized);
        }
        if !status.is_success() {
            return Err(StorageError::Status(status.as_u16()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(AuthSession {
            user_id: UserId::new(body.user.id),
            access_token: body.access_token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses_provider_payload() {
        let json = format!(
            r#"{{"access_token":"jwt-here","token_type":"bearer","expires_in":3600,"user":{{"id":"{}","email":"a@b.c"}}}}"#,
            Uuid::nil()
        );
        let parsed: TokenResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.access_token, "jwt-here");
        assert_eq!(parsed.user.id, Uuid::nil());
    }
}
