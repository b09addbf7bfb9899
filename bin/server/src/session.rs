//! Reactive session provider.
//!
//! The provider owns a [`SessionMachine`] inside an `RwSignal` and is handed
//! to the component tree through Leptos context. Components read the state
//! reactively; the machine decides which results are still current when the
//! server functions answer.
//!
//! Every server call is raced against a deadline, so a stalled connection
//! settles the session instead of leaving it `Loading`.

use crate::user::{
    PendingSignIn, commit_session, discard_session, request_sign_in, request_sign_out,
    restore_session,
};
use futures::channel::oneshot;
use futures::future::{Either, select};
use hotel_portal_core::SignInGrantId;
use hotel_portal_platform_access::{
    AuthError, Credentials, Identity, Resolution, SessionMachine, SessionRecoveryError,
    SessionState, SignOutOutcome,
};
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// How long the browser waits for a session server function.
///
/// Kept above the server's identity-service timeout (10s by default) so the
/// server normally answers first.
pub const RESPONSE_DEADLINE: Duration = Duration::from_secs(15);

/// Handle to the session state shared through context.
#[derive(Debug, Clone, Copy)]
pub struct SessionProvider {
    machine: RwSignal<SessionMachine>,
    deadline: Duration,
}

impl SessionProvider {
    /// Creates a provider in the `Loading` state.
    pub fn new() -> Self {
        Self::with_deadline(RESPONSE_DEADLINE)
    }

    /// Creates a provider that gives up on server calls after `deadline`.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            machine: RwSignal::new(SessionMachine::new()),
            deadline,
        }
    }

    /// Returns the session state, tracking it in the current reactive scope.
    pub fn state(&self) -> SessionState {
        self.machine.with(|machine| machine.state().clone())
    }

    /// Returns the session state without tracking.
    pub fn current(&self) -> SessionState {
        self.machine.with_untracked(|machine| machine.state().clone())
    }

    /// Returns the signed-in staff member, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.machine.with(|machine| machine.state().identity().cloned())
    }

    /// Returns true while the latest sign-in is waiting for the server.
    pub fn is_signing_in(&self) -> bool {
        self.machine.with(SessionMachine::is_signing_in)
    }

    /// Recovers the session from the cookie.
    ///
    /// The state is `Loading` until the server answers or the deadline
    /// passes; every failure ends in `Unauthenticated`.
    pub fn initialize(&self) {
        let Some(attempt) = self.machine.try_update(SessionMachine::begin_recovery) else {
            return;
        };
        let machine = self.machine;
        let deadline = self.deadline;
        spawn_local(async move {
            let answer = until_deadline(restore_session(), expire_after(deadline)).await;
            let outcome = recovery_outcome(answer, deadline);
            if let Err(e) = &outcome {
                logging::warn!("session recovery failed: {e}");
            }
            let resolution = machine
                .try_update(|machine| machine.finish_recovery(attempt, outcome))
                .unwrap_or(Resolution::Stale);
            if resolution == Resolution::Stale {
                logging::log!("dropped stale session recovery");
            }
        });
    }

    /// Signs in with the given credentials.
    ///
    /// Only the latest call takes effect. An earlier call that resolves after
    /// a newer sign-in or a sign-out returns [`AuthError::Superseded`] and its
    /// session is revoked. A failed sign-in also ends any session the cookie
    /// still holds.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<Identity, AuthError> {
        let Some(attempt) = self.machine.try_update(SessionMachine::begin_sign_in) else {
            return Err(AuthError::Superseded);
        };

        let request = request_sign_in(
            credentials.email().to_string(),
            credentials.password().to_string(),
        );
        let answer = until_deadline(request, expire_after(self.deadline)).await;
        let outcome = sign_in_outcome(answer, self.deadline);

        let identity_outcome = outcome
            .as_ref()
            .map(|pending| pending.identity.clone())
            .map_err(Clone::clone);
        let resolution = self
            .machine
            .try_update(|machine| machine.finish_sign_in(attempt, identity_outcome))
            .unwrap_or(Resolution::Stale);

        let (action, result) = plan_cookie(resolution, outcome);
        match action {
            CookieAction::Commit(grant) => {
                if let Err(e) = commit_session(grant).await {
                    logging::error!("failed to store session: {e}");
                }
                self.settle_commit(attempt.generation());
            }
            CookieAction::Discard(grant) => {
                logging::log!("discarding superseded sign-in");
                if let Err(e) = discard_session(grant).await {
                    logging::warn!("failed to revoke superseded sign-in: {e}");
                }
            }
            CookieAction::Clear => clear_cookie().await,
            CookieAction::Keep => {}
        }
        result
    }

    /// Ends the session.
    ///
    /// Signing out while signed out is a no-op that still succeeds.
    pub fn sign_out(&self) -> SignOutOutcome {
        let outcome = self
            .machine
            .try_update(SessionMachine::sign_out)
            .unwrap_or(SignOutOutcome::AlreadySignedOut);
        if outcome == SignOutOutcome::SignedOut {
            spawn_local(clear_cookie());
        }
        outcome
    }

    /// Clears the cookie again if a sign-out landed while the commit was in
    /// flight, so the browser cannot keep a session the UI has ended.
    fn settle_commit(&self, committed_at: u64) {
        let signed_out_meanwhile = self
            .machine
            .with_untracked(|machine| machine.signed_out_since(committed_at));
        if signed_out_meanwhile {
            spawn_local(clear_cookie());
        }
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// What a resolved sign-in does to the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieAction {
    /// Store the accepted grant.
    Commit(SignInGrantId),
    /// Revoke a grant nobody wants any more.
    Discard(SignInGrantId),
    /// Remove whatever session the cookie holds.
    Clear,
    Keep,
}

fn plan_cookie(
    resolution: Resolution,
    outcome: Result<PendingSignIn, AuthError>,
) -> (CookieAction, Result<Identity, AuthError>) {
    match (resolution, outcome) {
        (Resolution::Applied, Ok(pending)) => {
            (CookieAction::Commit(pending.grant), Ok(pending.identity))
        }
        (Resolution::Applied, Err(e)) => (CookieAction::Clear, Err(e)),
        (Resolution::Stale, Ok(pending)) => {
            (CookieAction::Discard(pending.grant), Err(AuthError::Superseded))
        }
        (Resolution::Stale, Err(_)) => (CookieAction::Keep, Err(AuthError::Superseded)),
    }
}

fn recovery_outcome(
    answer: Option<Result<Option<Identity>, ServerFnError>>,
    deadline: Duration,
) -> Result<Option<Identity>, SessionRecoveryError> {
    match answer {
        Some(Ok(identity)) => Ok(identity),
        Some(Err(e)) => Err(SessionRecoveryError::Unavailable {
            detail: e.to_string(),
        }),
        None => Err(SessionRecoveryError::Unavailable {
            detail: no_answer(deadline),
        }),
    }
}

fn sign_in_outcome(
    answer: Option<Result<Result<PendingSignIn, AuthError>, ServerFnError>>,
    deadline: Duration,
) -> Result<PendingSignIn, AuthError> {
    match answer {
        Some(Ok(outcome)) => outcome,
        Some(Err(e)) => Err(AuthError::Network {
            detail: e.to_string(),
        }),
        None => Err(AuthError::Network {
            detail: no_answer(deadline),
        }),
    }
}

fn no_answer(deadline: Duration) -> String {
    format!("no answer within {}s", deadline.as_secs())
}

/// Waits for `request`, or returns `None` if `deadline` completes first.
async fn until_deadline<T>(
    request: impl Future<Output = T>,
    deadline: impl Future<Output = ()>,
) -> Option<T> {
    match select(pin!(request), pin!(deadline)).await {
        Either::Left((value, _)) => Some(value),
        Either::Right(((), _)) => None,
    }
}

/// Completes once `after` has passed in the browser.
fn expire_after(after: Duration) -> impl Future<Output = ()> {
    let (fired, expired) = oneshot::channel::<()>();
    set_timeout(
        move || {
            let _ = fired.send(());
        },
        after,
    );
    async move {
        if expired.await.is_err() {
            // Timer dropped without firing; leave the request unbounded.
            std::future::pending::<()>().await;
        }
    }
}

async fn clear_cookie() {
    if let Err(e) = request_sign_out().await {
        logging::warn!("sign-out request failed: {e}");
    }
}

/// Creates a session provider and places it in context.
pub fn provide_session() -> SessionProvider {
    let session = SessionProvider::new();
    provide_context(session);
    session
}

/// Returns the session provider from context.
///
/// # Panics
///
/// Panics if called outside a tree where [`provide_session`] ran.
pub fn use_session() -> SessionProvider {
    expect_context::<SessionProvider>()
}
