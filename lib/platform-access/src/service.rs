//! The external identity service.
//!
//! The portal does not store credentials. It hands them to a hosted identity
//! service, which answers with a session token, and later turns that token
//! back into the staff profile. This module defines the contract; the
//! server provides the HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, SessionRecoveryError};
use crate::identity::Identity;
use crate::session::SessionToken;

/// Email and password submitted on the sign-in form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials. The email is trimmed.
    #[must_use]
    pub fn new(email: &str, password: String) -> Self {
        Self {
            email: email.trim().to_string(),
            password,
        }
    }

    /// Returns the email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns true if either field is empty.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIn {
    /// The staff member who signed in.
    pub identity: Identity,
    /// Token to persist for session recovery.
    pub token: SessionToken,
    /// Token lifetime in seconds, when the service reports one.
    pub expires_in: Option<i64>,
}

/// Contract for the hosted identity service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchanges credentials for an identity and a session token.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, AuthError>;

    /// Resolves a persisted token back into the identity it belongs to.
    async fn resolve(&self, token: &SessionToken) -> Result<Identity, SessionRecoveryError>;

    /// Revokes a token. Revoking an unknown or expired token succeeds.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError>;

    /// Returns a short name for logs.
    fn service_name(&self) -> &'static str;
}

/// Connection settings for the identity service.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityServiceConfig {
    /// Base URL of the service (e.g. "https://grandeur.supabase.co").
    url: String,
    /// Public API key sent with every request.
    api_key: String,
    /// Table holding staff profiles.
    /// Default: "profiles"
    #[serde(default = "default_profiles_table")]
    profiles_table: String,
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

impl IdentityServiceConfig {
    /// Creates a configuration with the default profiles table.
    #[must_use]
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            url,
            api_key,
            profiles_table: default_profiles_table(),
        }
    }

    /// Returns this configuration with a different profiles table.
    #[must_use]
    pub fn with_profiles_table(mut self, table: String) -> Self {
        self.profiles_table = table;
        self
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the profiles table name.
    #[must_use]
    pub fn profiles_table(&self) -> &str {
        &self.profiles_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use chrono::Utc;
    use hotel_portal_core::UserId;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory identity service keyed by email.
    struct FakeIdentityService {
        staff: HashMap<String, (String, Identity)>,
        issued: Mutex<HashMap<String, Identity>>,
    }

    impl FakeIdentityService {
        fn new() -> Self {
            let mut staff = HashMap::new();
            staff.insert(
                "manager@grandeur.example".to_string(),
                (
                    "correct horse".to_string(),
                    Identity::new(
                        UserId::from_u128(1),
                        "manager@grandeur.example".to_string(),
                        "Grace Manager".to_string(),
                        "GR-0001".to_string(),
                        Role::SuperAdmin,
                        Utc::now(),
                    ),
                ),
            );
            Self {
                staff,
                issued: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl IdentityService for FakeIdentityService {
        async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, AuthError> {
            let (password, identity) = self
                .staff
                .get(credentials.email())
                .ok_or(AuthError::InvalidCredentials)?;
            if password != credentials.password() {
                return Err(AuthError::InvalidCredentials);
            }
            let token = format!("token-{}", identity.staff_id());
            self.issued
                .lock()
                .unwrap()
                .insert(token.clone(), identity.clone());
            Ok(SignedIn {
                identity: identity.clone(),
                token: SessionToken::new(token),
                expires_in: Some(3600),
            })
        }

        async fn resolve(&self, token: &SessionToken) -> Result<Identity, SessionRecoveryError> {
            self.issued
                .lock()
                .unwrap()
                .get(token.as_str())
                .cloned()
                .ok_or(SessionRecoveryError::InvalidToken)
        }

        async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
            self.issued.lock().unwrap().remove(token.as_str());
            Ok(())
        }

        fn service_name(&self) -> &'static str {
            "fake"
        }
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("  front@grandeur.example ", "hunter2".to_string());
        assert_eq!(credentials.email(), "front@grandeur.example");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("front@grandeur.example"));
    }

    #[test]
    fn incomplete_credentials() {
        assert!(Credentials::new("", "pw".to_string()).is_incomplete());
        assert!(Credentials::new("a@b.c", String::new()).is_incomplete());
        assert!(!Credentials::new("a@b.c", "pw".to_string()).is_incomplete());
    }

    #[test]
    fn config_defaults_and_trailing_slash() {
        let config = IdentityServiceConfig::new(
            "https://grandeur.supabase.co/".to_string(),
            "anon-key".to_string(),
        );
        assert_eq!(config.url(), "https://grandeur.supabase.co");
        assert_eq!(config.api_key(), "anon-key");
        assert_eq!(config.profiles_table(), "profiles");

        let config = config.with_profiles_table("staff_profiles".to_string());
        assert_eq!(config.profiles_table(), "staff_profiles");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"url": "https://id.example", "api_key": "k"}"#;
        let config: IdentityServiceConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.profiles_table(), "profiles");
    }

    #[tokio::test]
    async fn sign_in_then_resolve_then_sign_out() {
        let service = FakeIdentityService::new();
        let credentials =
            Credentials::new("manager@grandeur.example", "correct horse".to_string());

        let signed_in = service.sign_in(&credentials).await.expect("sign in");
        assert_eq!(signed_in.identity.role(), Some(Role::SuperAdmin));

        let resolved = service.resolve(&signed_in.token).await.expect("resolve");
        assert_eq!(resolved, signed_in.identity);

        service.sign_out(&signed_in.token).await.expect("sign out");
        assert_eq!(
            service.resolve(&signed_in.token).await,
            Err(SessionRecoveryError::InvalidToken)
        );
        // Revoking twice is fine.
        service.sign_out(&signed_in.token).await.expect("sign out");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let service = FakeIdentityService::new();
        let credentials = Credentials::new("manager@grandeur.example", "guess".to_string());
        assert_eq!(
            service.sign_in(&credentials).await.unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let service: std::sync::Arc<dyn IdentityService> =
            std::sync::Arc::new(FakeIdentityService::new());
        assert_eq!(service.service_name(), "fake");
        let unknown = SessionToken::new("nope".to_string());
        assert!(service.resolve(&unknown).await.is_err());
    }
}
