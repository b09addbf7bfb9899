//! Server-side authentication for the staff portal.
//!
//! This module provides:
//! - The HTTP client for the hosted identity service
//! - Shared application state handed to server functions
//!
//! # Session Model
//!
//! The portal keeps no session store of its own. The identity service issues
//! an access token at sign-in; the server parks it under a short-lived grant
//! until the browser commits it, then moves it into an HTTP-only `session`
//! cookie and resolves it back into a staff profile whenever the browser
//! asks to restore its session. Role checks happen in the route guard
//! against the identity returned here.

pub mod grants;
pub mod identity;

use crate::config::SessionConfig;
use hotel_portal_platform_access::IdentityService;
use std::sync::Arc;
use std::time::Duration;

pub use grants::{PendingGrant, PendingGrants};
pub use identity::HostedIdentityService;

/// Shared application state.
pub struct AppState {
    /// Identity service used for sign-in, recovery and sign-out.
    pub identity: Arc<dyn IdentityService>,
    /// Accepted sign-ins whose tokens are not in a cookie yet.
    pub grants: PendingGrants,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(identity: Arc<dyn IdentityService>, session_config: SessionConfig) -> Self {
        Self {
            identity,
            grants: PendingGrants::new(session_config.grant_ttl()),
            session_config,
        }
    }

    /// Returns the bound on a single identity service call.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.session_config.request_timeout()
    }
}
