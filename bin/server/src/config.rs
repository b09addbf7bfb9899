//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`IdentityServiceConfig`](hotel_portal_platform_access::IdentityServiceConfig)
//! for the identity service settings.

use config::{ConfigBuilder, builder::DefaultState};
use hotel_portal_platform_access::IdentityServiceConfig;
use serde::Deserialize;
use std::time::Duration;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Identity service connection (`IDENTITY__URL`, `IDENTITY__API_KEY`, ...).
    pub identity: IdentityServiceConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on any single identity service round trip, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Session cookie lifetime in minutes, used when the identity service
    /// does not report a token lifetime.
    #[serde(default = "default_cookie_max_age_minutes")]
    pub cookie_max_age_minutes: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// How long an accepted sign-in waits for the browser to store it,
    /// in seconds.
    #[serde(default = "default_grant_ttl_seconds")]
    pub grant_ttl_seconds: u64,
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_cookie_max_age_minutes() -> i64 {
    480
}

fn default_secure_cookies() -> bool {
    true
}

fn default_grant_ttl_seconds() -> u64 {
    120
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout_seconds(),
            cookie_max_age_minutes: default_cookie_max_age_minutes(),
            secure_cookies: default_secure_cookies(),
            grant_ttl_seconds: default_grant_ttl_seconds(),
        }
    }
}

impl SessionConfig {
    /// Returns the identity service timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Returns the lifetime of an unclaimed sign-in grant.
    #[must_use]
    pub fn grant_ttl(&self) -> Duration {
        Duration::from_secs(self.grant_ttl_seconds)
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(
            config::Config::builder().add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            ),
        )
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Result<ServerConfig, config::ConfigError> {
        ServerConfig::load(
            config::Config::builder()
                .add_source(config::File::from_str(json, config::FileFormat::Json)),
        )
    }

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.cookie_max_age_minutes, 480);
        assert!(config.secure_cookies);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.grant_ttl(), Duration::from_secs(120));
    }

    #[test]
    fn loads_identity_with_default_session() {
        let config = from_json(
            r#"{"identity": {"url": "https://grandeur.supabase.co", "api_key": "anon"}}"#,
        )
        .expect("load");
        assert_eq!(config.identity.url(), "https://grandeur.supabase.co");
        assert_eq!(config.identity.profiles_table(), "profiles");
        assert_eq!(config.session.request_timeout_seconds, 10);
    }

    #[test]
    fn session_overrides_apply() {
        let config = from_json(
            r#"{
                "identity": {"url": "http://localhost:54321", "api_key": "anon"},
                "session": {"request_timeout_seconds": 3, "secure_cookies": false}
            }"#,
        )
        .expect("load");
        assert_eq!(config.session.request_timeout_seconds, 3);
        assert!(!config.session.secure_cookies);
        assert_eq!(config.session.cookie_max_age_minutes, 480);
    }

    #[test]
    fn missing_identity_is_an_error() {
        assert!(from_json(r#"{"session": {"secure_cookies": false}}"#).is_err());
    }
}
