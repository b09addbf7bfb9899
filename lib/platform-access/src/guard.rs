//! Access decisions for protected views.

use serde::{Deserialize, Serialize};

use crate::role::RoleSet;
use crate::session::SessionState;

/// Path of the sign-in page.
pub const SIGN_IN_PATH: &str = "/login";

/// Path of the page shown when a signed-in user lacks the required role.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What to do with a single navigation to a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Show the requested view.
    Render,
    /// The session check is still running; show a neutral loading indicator.
    Pending,
    /// Nobody is signed in.
    RedirectToSignIn,
    /// The signed-in user's role is not allowed here.
    RedirectToUnauthorized,
}

impl Decision {
    /// Returns the path to redirect to, if this decision redirects.
    #[must_use]
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToSignIn => Some(SIGN_IN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Render | Self::Pending => None,
        }
    }
}

/// Decides whether a view guarded by `allowed` may render for `state`.
///
/// An identity without a recognized role never matches.
#[must_use]
pub fn authorize(state: &SessionState, allowed: &RoleSet) -> Decision {
    match state {
        SessionState::Loading => Decision::Pending,
        SessionState::Unauthenticated => Decision::RedirectToSignIn,
        SessionState::Authenticated(identity) => match identity.role() {
            Some(role) if allowed.contains(role) => Decision::Render,
            _ => Decision::RedirectToUnauthorized,
        },
    }
}
