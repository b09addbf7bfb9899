//! Domain error types for server functions.
//!
//! Server functions log the detailed error and hand the browser a user-safe
//! `ServerFnError` built from it.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors raised by the session server functions.
#[derive(Debug)]
pub enum SessionError {
    /// The identity service could not be reached or did not answer in time.
    ServiceUnavailable { details: String },
    /// The session cookie could not be written.
    Cookie { details: String },
    /// A sign-in grant was unknown, already claimed or expired.
    UnknownGrant,
    /// The application state was not installed on the router.
    MissingState,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceUnavailable { details } => {
                write!(f, "identity service unavailable: {}", details)
            }
            Self::Cookie { details } => write!(f, "failed to write session cookie: {}", details),
            Self::UnknownGrant => write!(f, "sign-in grant unknown or expired"),
            Self::MissingState => write!(f, "application state not installed"),
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SessionError::ServiceUnavailable { .. } => {
                ServerFnError::new("Sign-in service unavailable")
            }
            SessionError::Cookie { .. } => ServerFnError::new("Could not store session"),
            SessionError::UnknownGrant => ServerFnError::new("Sign-in expired, please try again"),
            SessionError::MissingState => ServerFnError::new("Server misconfigured"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_hides_details() {
        let err = SessionError::ServiceUnavailable {
            details: "connect to 10.0.0.5:443 refused".to_string(),
        };
        assert!(err.to_string().contains("10.0.0.5"));
        let message = err.into_server_error().to_string();
        assert!(!message.contains("10.0.0.5"));
        assert!(message.contains("Sign-in service unavailable"));
    }

    #[test]
    fn every_variant_has_a_message() {
        for err in [
            SessionError::ServiceUnavailable {
                details: String::new(),
            },
            SessionError::Cookie {
                details: "invalid header".to_string(),
            },
            SessionError::UnknownGrant,
            SessionError::MissingState,
        ] {
            assert!(!err.into_server_error().to_string().is_empty());
        }
    }
}
