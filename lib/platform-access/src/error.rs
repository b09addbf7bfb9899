//! Error types for the platform-access crate.
//!
//! - `AuthError`: a sign-in attempt failed; shown to the user, never fatal
//! - `SessionRecoveryError`: a persisted token could not be turned back into
//!   an identity; the session simply becomes unauthenticated
//! - `ConfigurationError`: the route table or identity service is set up
//!   wrongly; fatal at startup

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors from sign-in attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AuthError {
    /// The identity service rejected the email/password pair.
    InvalidCredentials,
    /// The identity service could not be reached or did not answer in time.
    Network { detail: String },
    /// Any other failure (unexpected response, missing staff profile).
    Unknown { detail: String },
    /// A newer sign-in or sign-out started before this attempt resolved.
    Superseded,
}

impl AuthError {
    /// Returns a message suitable for showing on the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid email or password.",
            Self::Network { .. } => "Unable to reach the sign-in service. Please try again.",
            Self::Unknown { .. } => "Sign-in failed. Please contact a supervisor.",
            Self::Superseded => "Sign-in was replaced by a newer request.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Network { detail } => write!(f, "identity service unreachable: {detail}"),
            Self::Unknown { detail } => write!(f, "sign-in failed: {detail}"),
            Self::Superseded => write!(f, "sign-in superseded by a newer request"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors from recovering a session out of a persisted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRecoveryError {
    /// The token is not recognized by the identity service.
    InvalidToken,
    /// The token was recognized but has expired.
    Expired,
    /// The identity service could not be reached or did not answer in time.
    Unavailable { detail: String },
    /// The token is valid but no staff profile exists for its user.
    MissingProfile { user_id: String },
}

impl fmt::Display for SessionRecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "session token is invalid"),
            Self::Expired => write!(f, "session token has expired"),
            Self::Unavailable { detail } => {
                write!(f, "identity service unavailable: {detail}")
            }
            Self::MissingProfile { user_id } => {
                write!(f, "no staff profile for user {user_id}")
            }
        }
    }
}

impl std::error::Error for SessionRecoveryError {}

/// Errors in static configuration, detected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A protected route was declared with no allowed roles.
    EmptyAllowList { path: String },
    /// The same protected path was declared twice.
    DuplicateRoute { path: String },
    /// A route path is not an absolute path.
    InvalidPath { path: String },
    /// The identity service client could not be set up.
    IdentityService { reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAllowList { path } => {
                write!(f, "protected route '{path}' allows no roles")
            }
            Self::DuplicateRoute { path } => {
                write!(f, "protected route '{path}' is declared more than once")
            }
            Self::InvalidPath { path } => {
                write!(f, "route path '{path}' must start with '/'")
            }
            Self::IdentityService { reason } => {
                write!(f, "identity service misconfigured: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
