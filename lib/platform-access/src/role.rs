//! Staff roles and role sets for route access control.
//!
//! Every staff profile carries exactly one role from a closed set. Routes
//! declare which roles may enter them as a `RoleSet`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every dashboard.
    SuperAdmin,
    /// Shift supervisor.
    Supervisor,
    /// Front desk.
    Receptionist,
    /// Bar staff.
    Barman,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 4] = [
        Role::SuperAdmin,
        Role::Supervisor,
        Role::Receptionist,
        Role::Barman,
    ];

    /// Returns the wire name used by the profile store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Supervisor => "supervisor",
            Self::Receptionist => "receptionist",
            Self::Barman => "barman",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Supervisor => "Supervisor",
            Self::Receptionist => "Receptionist",
            Self::Barman => "Barman",
        }
    }

    /// Returns the path of this role's home dashboard.
    #[must_use]
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "/superadmin",
            Self::Supervisor => "/supervisor",
            Self::Receptionist => "/receptionist",
            Self::Barman => "/barman",
        }
    }

    /// Returns true if this role has unrestricted access.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole {
    /// The rejected value.
    pub value: String,
}

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.value)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole {
                value: s.to_string(),
            })
    }
}

/// Deserializes an optional role, mapping unrecognized names to `None`.
///
/// A profile row with a role outside the closed set must not fail the whole
/// identity; it yields an identity that holds no role at all.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Set of roles allowed on a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub fn none() -> Self {
        Self { roles: Vec::new() }
    }

    /// Creates a role set containing every role.
    #[must_use]
    pub fn all() -> Self {
        Self::from_iter(Role::ALL)
    }

    /// Returns this set with `role` added.
    #[must_use]
    pub fn with(mut self, role: Role) -> Self {
        self.insert(role);
        self
    }

    /// Adds a role. Returns false if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        if self.roles.contains(&role) {
            return false;
        }
        self.roles.push(role);
        self.roles.sort();
        true
    }

    /// Returns true if `role` is in the set.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true if no role is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns the roles as a slice, in `Role` order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::none();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self::from_iter(roles)
    }
}
