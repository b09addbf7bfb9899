//! Accepted sign-ins waiting to be stored in the session cookie.
//!
//! A sign-in hands the browser a [`SignInGrantId`] instead of the access
//! token. The token stays here until the browser either commits the grant,
//! which moves the token into the HTTP-only cookie, or discards it. Grants
//! nobody claims expire.

use hotel_portal_core::SignInGrantId;
use hotel_portal_platform_access::SessionToken;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A token waiting for its grant to be claimed.
#[derive(Debug)]
pub struct PendingGrant {
    /// The access token issued by the identity service.
    pub token: SessionToken,
    /// Token lifetime in seconds, when the service reported one.
    pub expires_in: Option<i64>,
    issued_at: Instant,
}

/// In-memory store of unclaimed grants.
#[derive(Debug)]
pub struct PendingGrants {
    grants: Mutex<HashMap<SignInGrantId, PendingGrant>>,
    ttl: Duration,
}

impl PendingGrants {
    /// Creates an empty store whose grants live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            grants: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a token and returns the grant that claims it.
    ///
    /// Expired grants are dropped first. Their tokens are returned so the
    /// caller can revoke them.
    pub fn insert(
        &self,
        token: SessionToken,
        expires_in: Option<i64>,
    ) -> (SignInGrantId, Vec<SessionToken>) {
        let id = SignInGrantId::new();
        let mut grants = self.lock();
        let expired = self.drain_expired(&mut grants);
        grants.insert(
            id,
            PendingGrant {
                token,
                expires_in,
                issued_at: Instant::now(),
            },
        );
        (id, expired)
    }

    /// Removes and returns the grant, if it exists and has not expired.
    pub fn take(&self, id: &SignInGrantId) -> Option<PendingGrant> {
        let grant = self.lock().remove(id)?;
        (grant.issued_at.elapsed() <= self.ttl).then_some(grant)
    }

    /// Returns the number of unclaimed grants.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no grants are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn drain_expired(
        &self,
        grants: &mut HashMap<SignInGrantId, PendingGrant>,
    ) -> Vec<SessionToken> {
        let expired: Vec<SignInGrantId> = grants
            .iter()
            .filter(|(_, grant)| grant.issued_at.elapsed() > self.ttl)
            .map(|(id, _)| *id)
            .collect();
        expired
            .iter()
            .filter_map(|id| grants.remove(id))
            .map(|grant| grant.token)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SignInGrantId, PendingGrant>> {
        self.grants
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
