//! Staff access control for the hotel portal.
//!
//! This crate provides:
//! - The staff role taxonomy (`Role`, `RoleSet`)
//! - The signed-in staff member (`Identity`)
//! - Session state and its transitions (`SessionState`, `SessionMachine`)
//! - The route guard (`authorize`, `Decision`) and the route table it reads
//!   allow-lists from (`RouteTable`)
//! - The identity service contract (`IdentityService`, `Credentials`)
//! - Error types
//!
//! Nothing here performs I/O, so the same types run on the server and in the
//! browser.
//!
//! # Example
//!
//! ```
//! use hotel_portal_platform_access::{
//!     Decision, Identity, Role, RouteTable, SessionMachine, SessionState,
//! };
//! use hotel_portal_core::UserId;
//! use chrono::Utc;
//!
//! let routes = RouteTable::builder()
//!     .protect("/superadmin", [Role::SuperAdmin])
//!     .protect("/barman", [Role::Barman])
//!     .build()
//!     .expect("valid route table");
//!
//! let mut session = SessionMachine::new();
//! assert_eq!(routes.evaluate("/barman", session.state()), Decision::Pending);
//!
//! let attempt = session.begin_recovery();
//! let barman = Identity::new(
//!     UserId::new(),
//!     "bar@grandeur.example".to_string(),
//!     "Tom Bar".to_string(),
//!     "GR-0100".to_string(),
//!     Role::Barman,
//!     Utc::now(),
//! );
//! session.finish_recovery(attempt, Ok(Some(barman)));
//!
//! assert_eq!(routes.evaluate("/barman", session.state()), Decision::Render);
//! assert_eq!(
//!     routes.evaluate("/superadmin", session.state()),
//!     Decision::RedirectToUnauthorized
//! );
//!
//! session.sign_out();
//! assert_eq!(session.state(), &SessionState::Unauthenticated);
//! ```

pub mod error;
pub mod guard;
pub mod identity;
pub mod role;
pub mod routes;
pub mod service;
pub mod session;

// Re-export main types at crate root
pub use error::{AuthError, ConfigurationError, SessionRecoveryError};
pub use guard::{Decision, SIGN_IN_PATH, UNAUTHORIZED_PATH, authorize};
pub use identity::Identity;
pub use role::{Role, RoleSet, UnknownRole};
pub use routes::{RouteTable, RouteTableBuilder};
pub use service::{Credentials, IdentityService, IdentityServiceConfig, SignedIn};
pub use session::{Attempt, Resolution, SessionMachine, SessionState, SessionToken, SignOutOutcome};
