//! The authenticated staff identity.
//!
//! An `Identity` is built from the staff profile row once the identity
//! service has accepted a sign-in or a persisted token. It is read-only for
//! the lifetime of a session; a role change only takes effect after the user
//! signs in again.

use chrono::{DateTime, Utc};
use hotel_portal_core::UserId;
use serde::{Deserialize, Serialize};

use crate::role::{self, Role};

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Profile ID, shared with the identity service's user ID.
    id: UserId,
    /// Sign-in email.
    email: String,
    /// Display name.
    name: String,
    /// Hotel staff number (e.g. "GR-0042").
    staff_id: String,
    /// Assigned role. `None` when the stored value is not a known role.
    #[serde(default, deserialize_with = "role::deserialize_lenient")]
    role: Option<Role>,
    /// When the profile was created.
    created_at: DateTime<Utc>,
}

impl Identity {
    /// Creates an identity with a known role.
    #[must_use]
    pub fn new(
        id: UserId,
        email: String,
        name: String,
        staff_id: String,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            staff_id,
            role: Some(role),
            created_at,
        }
    }

    /// Creates an identity from a raw profile role value.
    ///
    /// Unrecognized role names produce an identity without a role, which no
    /// route allow-list will ever match.
    #[must_use]
    pub fn from_profile(
        id: UserId,
        email: String,
        name: String,
        staff_id: String,
        raw_role: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            staff_id,
            role: raw_role.parse().ok(),
            created_at,
        }
    }

    /// Returns the profile ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the staff number.
    #[must_use]
    pub fn staff_id(&self) -> &str {
        &self.staff_id
    }

    /// Returns the role, or `None` if the profile's role is not recognized.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns when the profile was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the dashboard this identity lands on after sign-in.
    #[must_use]
    pub fn home_path(&self) -> Option<&'static str> {
        self.role.map(|role| role.dashboard_path())
    }
}
