//! Session state and the transitions that move between states.
//!
//! `SessionMachine` is the single owner of the current `SessionState`. It is
//! deliberately free of I/O: the UI wraps it in a reactive signal and drives
//! it from async tasks, and every transition goes through one of its methods.
//!
//! Calls that suspend (`begin_recovery`, `begin_sign_in`) hand out an
//! [`Attempt`]. Each mutating call advances a generation counter, and only
//! the attempt matching the latest generation may resolve; anything older is
//! reported as [`Resolution::Stale`] and leaves the state untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, SessionRecoveryError};
use crate::identity::Identity;

/// Opaque token persisted between visits to recover a session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a token string issued by the identity service.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Who is signed in right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "identity", rename_all = "snake_case")]
pub enum SessionState {
    /// The initial session check has not finished yet.
    Loading,
    /// A staff member is signed in.
    Authenticated(Identity),
    /// Nobody is signed in.
    Unauthenticated,
}

impl SessionState {
    /// Returns the signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Loading | Self::Unauthenticated => None,
        }
    }

    /// Returns true while the initial session check is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if a staff member is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Handle for a suspended session call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    generation: u64,
    kind: AttemptKind,
}

impl Attempt {
    /// Returns the generation this attempt started at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptKind {
    Recovery,
    SignIn,
}

/// Outcome of resolving an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The attempt was current and its result is now the session state.
    Applied,
    /// A newer call started after this attempt; its result was dropped.
    Stale,
}

/// Outcome of a sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutOutcome {
    /// A session (or a pending check) was ended.
    SignedOut,
    /// Nobody was signed in; nothing changed.
    AlreadySignedOut,
}

/// Owner of the session state and its transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMachine {
    state: SessionState,
    generation: u64,
    in_flight: Option<Attempt>,
    last_sign_out: Option<u64>,
}

impl SessionMachine {
    /// Creates a machine in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
            generation: 0,
            in_flight: None,
            last_sign_out: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the number of mutating calls made so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if an attempt is waiting to resolve.
    #[must_use]
    pub fn has_pending_attempt(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true if a sign-in is waiting to resolve.
    #[must_use]
    pub fn is_signing_in(&self) -> bool {
        self.in_flight
            .is_some_and(|attempt| attempt.kind == AttemptKind::SignIn)
    }

    /// Returns true if a sign-out happened after the call made at
    /// `generation`.
    #[must_use]
    pub fn signed_out_since(&self, generation: u64) -> bool {
        self.last_sign_out.is_some_and(|signed_out| signed_out > generation)
    }

    /// Starts recovering a session from a persisted token.
    ///
    /// The state becomes `Loading` until the returned attempt resolves.
    pub fn begin_recovery(&mut self) -> Attempt {
        self.state = SessionState::Loading;
        self.start(AttemptKind::Recovery)
    }

    /// Starts a sign-in. The current state is kept until the attempt resolves.
    pub fn begin_sign_in(&mut self) -> Attempt {
        self.start(AttemptKind::SignIn)
    }

    /// Resolves a recovery attempt.
    ///
    /// Any failure leaves the session unauthenticated.
    pub fn finish_recovery(
        &mut self,
        attempt: Attempt,
        outcome: Result<Option<Identity>, SessionRecoveryError>,
    ) -> Resolution {
        if !self.is_current(attempt, AttemptKind::Recovery) {
            return Resolution::Stale;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(Some(identity)) => SessionState::Authenticated(identity),
            Ok(None) | Err(_) => SessionState::Unauthenticated,
        };
        Resolution::Applied
    }

    /// Resolves a sign-in attempt.
    ///
    /// A failed sign-in leaves the session unauthenticated, even if somebody
    /// was signed in before the attempt started.
    pub fn finish_sign_in(
        &mut self,
        attempt: Attempt,
        outcome: Result<Identity, AuthError>,
    ) -> Resolution {
        if !self.is_current(attempt, AttemptKind::SignIn) {
            return Resolution::Stale;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(identity) => SessionState::Authenticated(identity),
            Err(_) => SessionState::Unauthenticated,
        };
        Resolution::Applied
    }

    /// Ends the session and cancels any pending attempt.
    pub fn sign_out(&mut self) -> SignOutOutcome {
        self.generation += 1;
        self.last_sign_out = Some(self.generation);
        let had_pending = self.in_flight.take().is_some();
        let was_signed_out = self.state == SessionState::Unauthenticated;
        self.state = SessionState::Unauthenticated;

        if was_signed_out && !had_pending {
            SignOutOutcome::AlreadySignedOut
        } else {
            SignOutOutcome::SignedOut
        }
    }

    fn start(&mut self, kind: AttemptKind) -> Attempt {
        self.generation += 1;
        let attempt = Attempt {
            generation: self.generation,
            kind,
        };
        self.in_flight = Some(attempt);
        attempt
    }

    fn is_current(&self, attempt: Attempt, kind: AttemptKind) -> bool {
        attempt.kind == kind
            && attempt.generation == self.generation
            && self.in_flight == Some(attempt)
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use chrono::Utc;
    use hotel_portal_core::UserId;

    fn staff(name: &str, role: Role) -> Identity {
        Identity::new(
            UserId::new(),
            format!("{}@grandeur.example", name.to_lowercase()),
            name.to_string(),
            format!("GR-{name}"),
            role,
            Utc::now(),
        )
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("eyJhbGciOi.secret".to_string());
        assert!(!format!("{token:?}").contains("secret"));
        assert_eq!(token.as_str(), "eyJhbGciOi.secret");
    }

    #[test]
    fn new_machine_is_loading() {
        let machine = SessionMachine::new();
        assert!(machine.state().is_loading());
        assert!(!machine.has_pending_attempt());
    }

    #[test]
    fn recovery_with_identity_authenticates() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        assert!(machine.state().is_loading());

        let alice = staff("Alice", Role::Supervisor);
        let resolution = machine.finish_recovery(attempt, Ok(Some(alice.clone())));

        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(machine.state(), &SessionState::Authenticated(alice));
        assert!(!machine.has_pending_attempt());
    }

    #[test]
    fn recovery_without_token_is_unauthenticated() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        machine.finish_recovery(attempt, Ok(None));
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn recovery_failure_falls_back_to_unauthenticated() {
        for error in [
            SessionRecoveryError::Expired,
            SessionRecoveryError::InvalidToken,
            SessionRecoveryError::Unavailable {
                detail: "timed out".to_string(),
            },
        ] {
            let mut machine = SessionMachine::new();
            let attempt = machine.begin_recovery();
            machine.finish_recovery(attempt, Err(error));
            assert_eq!(machine.state(), &SessionState::Unauthenticated);
        }
    }

    #[test]
    fn sign_in_success_and_failure() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        machine.finish_recovery(attempt, Ok(None));

        let attempt = machine.begin_sign_in();
        machine.finish_sign_in(attempt, Err(AuthError::InvalidCredentials));
        assert_eq!(machine.state(), &SessionState::Unauthenticated);

        let bob = staff("Bob", Role::Barman);
        let attempt = machine.begin_sign_in();
        machine.finish_sign_in(attempt, Ok(bob.clone()));
        assert_eq!(machine.state(), &SessionState::Authenticated(bob));
    }

    #[test]
    fn sign_in_keeps_state_while_pending() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        let carol = staff("Carol", Role::Receptionist);
        machine.finish_recovery(attempt, Ok(Some(carol.clone())));

        let _pending = machine.begin_sign_in();
        assert_eq!(machine.state(), &SessionState::Authenticated(carol));
        assert!(machine.has_pending_attempt());
    }

    #[test]
    fn failed_sign_in_drops_previous_identity() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        machine.finish_recovery(attempt, Ok(Some(staff("Dan", Role::Supervisor))));

        let attempt = machine.begin_sign_in();
        machine.finish_sign_in(
            attempt,
            Err(AuthError::Network {
                detail: "reset".to_string(),
            }),
        );
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn later_sign_in_wins_when_earlier_resolves_last() {
        let mut machine = SessionMachine::new();
        let first = machine.begin_sign_in();
        let second = machine.begin_sign_in();

        let ben = staff("Ben", Role::Barman);
        assert_eq!(
            machine.finish_sign_in(second, Ok(ben.clone())),
            Resolution::Applied
        );
        assert_eq!(
            machine.finish_sign_in(first, Ok(staff("Amy", Role::SuperAdmin))),
            Resolution::Stale
        );
        assert_eq!(machine.state(), &SessionState::Authenticated(ben));
    }

    #[test]
    fn later_sign_in_wins_when_earlier_resolves_first() {
        let mut machine = SessionMachine::new();
        let first = machine.begin_sign_in();
        let second = machine.begin_sign_in();

        assert_eq!(
            machine.finish_sign_in(first, Ok(staff("Amy", Role::SuperAdmin))),
            Resolution::Stale
        );
        assert!(machine.state().is_loading());

        assert_eq!(
            machine.finish_sign_in(second, Err(AuthError::InvalidCredentials)),
            Resolution::Applied
        );
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn sign_in_during_recovery_discards_recovery() {
        let mut machine = SessionMachine::new();
        let recovery = machine.begin_recovery();
        let sign_in = machine.begin_sign_in();

        let eve = staff("Eve", Role::Receptionist);
        machine.finish_sign_in(sign_in, Ok(eve.clone()));
        assert_eq!(
            machine.finish_recovery(recovery, Ok(None)),
            Resolution::Stale
        );
        assert_eq!(machine.state(), &SessionState::Authenticated(eve));
    }

    #[test]
    fn sign_out_cancels_pending_sign_in() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_sign_in();
        assert_eq!(machine.sign_out(), SignOutOutcome::SignedOut);

        let resolution = machine.finish_sign_in(attempt, Ok(staff("Fay", Role::Supervisor)));
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn sign_out_during_loading_settles_state() {
        let mut machine = SessionMachine::new();
        let _recovery = machine.begin_recovery();
        machine.sign_out();
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn sign_out_is_idempotent() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        machine.finish_recovery(attempt, Ok(Some(staff("Gus", Role::Barman))));

        assert_eq!(machine.sign_out(), SignOutOutcome::SignedOut);
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
        assert_eq!(machine.sign_out(), SignOutOutcome::AlreadySignedOut);
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn every_mutating_call_advances_generation() {
        let mut machine = SessionMachine::new();
        assert_eq!(machine.generation(), 0);
        let recovery = machine.begin_recovery();
        assert_eq!(recovery.generation(), 1);
        let sign_in = machine.begin_sign_in();
        assert_eq!(sign_in.generation(), 2);
        machine.finish_sign_in(sign_in, Ok(staff("Flo", Role::Receptionist)));
        assert_eq!(machine.generation(), 2);
        machine.sign_out();
        machine.sign_out();
        assert_eq!(machine.generation(), 4);
    }

    #[test]
    fn sign_out_is_remembered_past_later_attempts() {
        let mut machine = SessionMachine::new();
        let first = machine.begin_sign_in();
        machine.finish_sign_in(first, Ok(staff("Abe", Role::Barman)));
        assert!(!machine.signed_out_since(first.generation()));

        machine.sign_out();
        let second = machine.begin_sign_in();
        assert!(machine.has_pending_attempt());
        assert!(machine.signed_out_since(first.generation()));
        assert!(!machine.signed_out_since(second.generation()));

        machine.finish_sign_in(second, Err(AuthError::InvalidCredentials));
        assert!(machine.signed_out_since(first.generation()));
    }

    #[test]
    fn signing_in_tracks_only_sign_in_attempts() {
        let mut machine = SessionMachine::new();
        machine.begin_recovery();
        assert!(!machine.is_signing_in());

        let attempt = machine.begin_sign_in();
        assert!(machine.is_signing_in());
        machine.finish_sign_in(attempt, Err(AuthError::InvalidCredentials));
        assert!(!machine.is_signing_in());

        machine.begin_sign_in();
        machine.sign_out();
        assert!(!machine.is_signing_in());
    }

    #[test]
    fn timed_out_recovery_settles_unauthenticated() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_recovery();
        let resolution = machine.finish_recovery(
            attempt,
            Err(SessionRecoveryError::Unavailable {
                detail: "no answer within 15s".to_string(),
            }),
        );
        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(machine.state(), &SessionState::Unauthenticated);
        assert!(!machine.has_pending_attempt());
    }

    #[test]
    fn attempt_cannot_resolve_twice() {
        let mut machine = SessionMachine::new();
        let attempt = machine.begin_sign_in();
        machine.finish_sign_in(attempt, Ok(staff("Hal", Role::Supervisor)));
        assert_eq!(
            machine.finish_sign_in(attempt, Err(AuthError::InvalidCredentials)),
            Resolution::Stale
        );
        assert!(machine.state().is_authenticated());
    }

    #[test]
    fn recovery_attempt_cannot_finish_as_sign_in() {
        let mut machine = SessionMachine::new();
        let recovery = machine.begin_recovery();
        assert_eq!(
            machine.finish_sign_in(recovery, Ok(staff("Ivy", Role::SuperAdmin))),
            Resolution::Stale
        );
        assert!(machine.state().is_loading());
    }

    #[test]
    fn session_state_serialization_format() {
        let json = serde_json::to_value(SessionState::Unauthenticated).expect("serialize");
        assert_eq!(json, serde_json::json!({"status": "unauthenticated"}));
    }
}
