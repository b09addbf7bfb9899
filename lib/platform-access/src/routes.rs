//! The route table: which roles may open which protected paths.
//!
//! The table is declared once with [`RouteTable::builder`] and validated
//! before the server starts serving. Paths that are not registered are
//! public.
//!
//! # Matching
//!
//! A request path is guarded by the longest registered path that is a prefix
//! of it on a segment boundary, so `/barman/stock` falls under `/barman` but
//! `/barmanager` does not. A trailing slash is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigurationError;
use crate::guard::{Decision, authorize};
use crate::role::{Role, RoleSet};
use crate::session::SessionState;

/// Validated mapping from protected path to allowed roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: BTreeMap<String, RoleSet>,
}

impl RouteTable {
    /// Starts declaring a route table.
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Returns the roles allowed on `path`, or `None` if the path is public.
    #[must_use]
    pub fn allowed_roles(&self, path: &str) -> Option<&RoleSet> {
        let path = normalize(path);
        self.routes
            .iter()
            .filter(|(protected, _)| covers(protected, path))
            .max_by_key(|(protected, _)| protected.len())
            .map(|(_, roles)| roles)
    }

    /// Returns true if `path` requires a signed-in user.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.allowed_roles(path).is_some()
    }

    /// Decides whether `path` may render for `state`.
    ///
    /// Public paths always render.
    #[must_use]
    pub fn evaluate(&self, path: &str, state: &SessionState) -> Decision {
        match self.allowed_roles(path) {
            Some(allowed) => authorize(state, allowed),
            None => Decision::Render,
        }
    }

    /// Iterates over the registered protected paths and their roles.
    pub fn protected_paths(&self) -> impl Iterator<Item = (&str, &RoleSet)> {
        self.routes
            .iter()
            .map(|(path, roles)| (path.as_str(), roles))
    }

    /// Returns the number of protected paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no path is protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for `RouteTable`.
///
/// Declarations are collected as given and only checked in [`build`].
///
/// [`build`]: RouteTableBuilder::build
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    declared: Vec<(String, RoleSet)>,
}

impl RouteTableBuilder {
    /// Protects `path` with the given allow-list.
    #[must_use]
    pub fn protect(mut self, path: impl Into<String>, roles: impl Into<RoleSet>) -> Self {
        self.declared.push((path.into(), roles.into()));
        self
    }

    /// Validates the declarations and builds the table.
    ///
    /// Every path must be absolute, declared once, and allow at least one
    /// role. `super_admin` is then added to every allow-list.
    pub fn build(self) -> Result<RouteTable, ConfigurationError> {
        let mut routes = BTreeMap::new();

        for (path, mut roles) in self.declared {
            if !path.starts_with('/') {
                return Err(ConfigurationError::InvalidPath { path });
            }
            if roles.is_empty() {
                return Err(ConfigurationError::EmptyAllowList { path });
            }
            let key = normalize(&path).to_string();
            if routes.contains_key(&key) {
                return Err(ConfigurationError::DuplicateRoute { path });
            }
            roles.insert(Role::SuperAdmin);
            routes.insert(key, roles);
        }

        Ok(RouteTable { routes })
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn covers(protected: &str, path: &str) -> bool {
    if protected == "/" {
        return true;
    }
    match path.strip_prefix(protected) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use chrono::Utc;
    use hotel_portal_core::UserId;

    fn staff_table() -> RouteTable {
        RouteTable::builder()
            .protect("/superadmin", [Role::SuperAdmin])
            .protect("/supervisor", [Role::Supervisor])
            .protect("/receptionist", [Role::Receptionist])
            .protect("/barman", [Role::Barman])
            .build()
            .expect("valid table")
    }

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(Identity::new(
            UserId::new(),
            "staff@grandeur.example".to_string(),
            "Staff".to_string(),
            "GR-0001".to_string(),
            role,
            Utc::now(),
        ))
    }

    #[test]
    fn empty_allow_list_is_rejected() {
        let err = RouteTable::builder()
            .protect("/barman", RoleSet::none())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyAllowList {
                path: "/barman".to_string()
            }
        );
    }

    #[test]
    fn duplicate_route_is_rejected() {
        let err = RouteTable::builder()
            .protect("/barman", [Role::Barman])
            .protect("/barman/", [Role::Supervisor])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateRoute {
                path: "/barman/".to_string()
            }
        );
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = RouteTable::builder()
            .protect("barman", [Role::Barman])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPath { .. }));
    }

    #[test]
    fn super_admin_is_added_to_every_route() {
        let table = staff_table();
        assert_eq!(table.len(), 4);
        for (_, roles) in table.protected_paths() {
            assert!(roles.contains(Role::SuperAdmin));
        }
        let barman = table.allowed_roles("/barman").expect("protected");
        assert_eq!(barman.roles(), &[Role::SuperAdmin, Role::Barman]);
    }

    #[test]
    fn unregistered_paths_are_public() {
        let table = staff_table();
        assert!(!table.is_protected("/"));
        assert!(!table.is_protected("/gallery"));
        assert!(!table.is_protected("/barmanager"));
        assert_eq!(
            table.evaluate("/gallery", &SessionState::Loading),
            Decision::Render
        );
    }

    #[test]
    fn nested_paths_follow_their_prefix() {
        let table = staff_table();
        assert!(table.is_protected("/barman/stock"));
        assert!(table.is_protected("/barman/"));
        assert!(table.is_protected("/supervisor?tab=shifts"));
    }

    #[test]
    fn longest_prefix_wins() {
        let table = RouteTable::builder()
            .protect("/reports", [Role::Supervisor])
            .protect("/reports/bar", [Role::Barman])
            .build()
            .expect("valid table");

        let bar = table.allowed_roles("/reports/bar/daily").expect("protected");
        assert!(bar.contains(Role::Barman));
        assert!(!bar.contains(Role::Supervisor));

        let reports = table.allowed_roles("/reports/rooms").expect("protected");
        assert!(reports.contains(Role::Supervisor));
    }

    #[test]
    fn evaluate_applies_the_guard() {
        let table = staff_table();
        assert_eq!(
            table.evaluate("/superadmin", &SessionState::Unauthenticated),
            Decision::RedirectToSignIn
        );
        assert_eq!(
            table.evaluate("/supervisor", &signed_in(Role::Barman)),
            Decision::RedirectToUnauthorized
        );
        assert_eq!(
            table.evaluate("/barman", &signed_in(Role::Barman)),
            Decision::Render
        );
        assert_eq!(
            table.evaluate("/receptionist", &signed_in(Role::SuperAdmin)),
            Decision::Render
        );
        assert_eq!(
            table.evaluate("/superadmin", &SessionState::Loading),
            Decision::Pending
        );
    }

    #[test]
    fn empty_table_protects_nothing() {
        let table = RouteTable::builder().build().expect("valid table");
        assert!(table.is_empty());
        assert!(!table.is_protected("/superadmin"));
    }
}
