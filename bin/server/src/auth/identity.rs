//! Client for the hosted identity service.
//!
//! Speaks the Supabase-style REST API: password grant on
//! `/auth/v1/token`, token introspection on `/auth/v1/user`, revocation on
//! `/auth/v1/logout`, and staff profile lookup on `/rest/v1/{profiles}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotel_portal_core::UserId;
use hotel_portal_platform_access::{
    AuthError, ConfigurationError, Credentials, Identity, IdentityService, IdentityServiceConfig,
    SessionRecoveryError, SessionToken, SignedIn,
};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROFILE_COLUMNS: &str = "id,email,name,staff_id,role,created_at";

/// Identity service reached over HTTP.
pub struct HostedIdentityService {
    config: IdentityServiceConfig,
    http: reqwest::Client,
}

/// Body of a successful password grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

/// The identity service's view of a user.
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
}

/// A row of the profiles table.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRow {
    id: UserId,
    email: String,
    name: String,
    staff_id: String,
    #[serde(default)]
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Builds the session identity. An unknown or missing role yields an
    /// identity without a role.
    pub(crate) fn into_identity(self) -> Identity {
        Identity::from_profile(
            self.id,
            self.email,
            self.name,
            self.staff_id,
            self.role.as_deref().unwrap_or_default(),
            self.created_at,
        )
    }
}

/// Maps a rejected password grant to an `AuthError`.
pub(crate) fn classify_sign_in_failure(status: StatusCode, body: &str) -> AuthError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY
            if body.contains("email_not_confirmed") =>
        {
            AuthError::Unknown {
                detail: "email address not confirmed".to_string(),
            }
        }
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
            AuthError::InvalidCredentials
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => AuthError::Network {
            detail: format!("identity service returned {status}"),
        },
        status if status.is_server_error() => AuthError::Network {
            detail: format!("identity service returned {status}"),
        },
        status => AuthError::Unknown {
            detail: format!("unexpected status {status}"),
        },
    }
}

/// Maps a rejected token introspection to a `SessionRecoveryError`.
pub(crate) fn classify_recovery_failure(status: StatusCode, body: &str) -> SessionRecoveryError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if body.contains("expired") => {
            SessionRecoveryError::Expired
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            SessionRecoveryError::InvalidToken
        }
        status => SessionRecoveryError::Unavailable {
            detail: format!("identity service returned {status}"),
        },
    }
}

fn network_error(e: &reqwest::Error) -> AuthError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        AuthError::Network {
            detail: e.to_string(),
        }
    } else {
        AuthError::Unknown {
            detail: e.to_string(),
        }
    }
}

impl HostedIdentityService {
    /// Creates a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or API key is unusable or the HTTP client
    /// cannot be built.
    pub fn new(
        config: IdentityServiceConfig,
        timeout: Duration,
    ) -> hotel_portal_core::Result<Self, ConfigurationError> {
        if !(config.url().starts_with("https://") || config.url().starts_with("http://")) {
            return Err(ConfigurationError::IdentityService {
                reason: format!("url '{}' is not an http(s) URL", config.url()),
            }
            .into());
        }
        if config.api_key().is_empty() {
            return Err(ConfigurationError::IdentityService {
                reason: "api key is empty".to_string(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConfigurationError::IdentityService {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url(), path)
    }

    /// Loads the staff profile for `user_id`, acting as the token's user.
    async fn fetch_profile(
        &self,
        user_id: UserId,
        access_token: &str,
    ) -> Result<Option<ProfileRow>, reqwest::Error> {
        let url = self.endpoint(&format!("/rest/v1/{}", self.config.profiles_table()));
        let rows: Vec<ProfileRow> = self
            .http
            .get(&url)
            .query(&[
                ("id", format!("eq.{}", user_id.as_uuid())),
                ("select", PROFILE_COLUMNS.to_string()),
            ])
            .header("apikey", self.config.api_key())
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl IdentityService for HostedIdentityService {
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, AuthError> {
        let response = self
            .http
            .post(self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", self.config.api_key())
            .json(&serde_json::json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Identity service unreachable during sign-in");
                network_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Password grant rejected");
            return Err(classify_sign_in_failure(status, &body));
        }

        let token: TokenResponse = response.json().await.map_err(|e| AuthError::Unknown {
            detail: format!("unreadable token response: {e}"),
        })?;

        let profile = self
            .fetch_profile(token.user.id, &token.access_token)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id = %token.user.id, "Failed to load staff profile");
                network_error(&e)
            })?
            .ok_or_else(|| AuthError::Unknown {
                detail: format!("no staff profile for user {}", token.user.id),
            })?;

        Ok(SignedIn {
            identity: profile.into_identity(),
            token: SessionToken::new(token.access_token),
            expires_in: token.expires_in,
        })
    }

    #[instrument(skip_all)]
    async fn resolve(&self, token: &SessionToken) -> Result<Identity, SessionRecoveryError> {
        let unavailable = |e: reqwest::Error| SessionRecoveryError::Unavailable {
            detail: e.to_string(),
        };

        let response = self
            .http
            .get(self.endpoint("/auth/v1/user"))
            .header("apikey", self.config.api_key())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_recovery_failure(status, &body));
        }

        let user: AuthUser = response.json().await.map_err(unavailable)?;

        self.fetch_profile(user.id, token.as_str())
            .await
            .map_err(unavailable)?
            .map(ProfileRow::into_identity)
            .ok_or_else(|| SessionRecoveryError::MissingProfile {
                user_id: user.id.to_string(),
            })
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/auth/v1/logout"))
            .header("apikey", self.config.api_key())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Already revoked or expired.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(()),
            status if status.is_server_error() => Err(AuthError::Network {
                detail: format!("identity service returned {status}"),
            }),
            status => Err(AuthError::Unknown {
                detail: format!("unexpected status {status}"),
            }),
        }
    }

    fn service_name(&self) -> &'static str {
        "hosted"
    }
}
