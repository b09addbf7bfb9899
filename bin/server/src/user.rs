//! Server functions behind the session provider.
//!
//! The access token never reaches the browser's scripts. It travels only in
//! an HTTP-only `session` cookie, written by [`commit_session`] and cleared
//! by [`request_sign_out`] or a failed [`restore_session`].
//!
//! Sign-in is two-step. [`request_sign_in`] checks the credentials, parks
//! the token server-side and hands back an opaque grant without touching the
//! cookie. The session provider then commits the grant only if no newer
//! sign-in or sign-out has started, and discards it otherwise. Out-of-order
//! responses therefore cannot leave the cookie pointing at a superseded
//! session.

use hotel_portal_core::SignInGrantId;
use hotel_portal_platform_access::{AuthError, Identity};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// An accepted sign-in whose token is still held by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSignIn {
    /// The staff member who signed in.
    pub identity: Identity,
    /// Claims the parked token in [`commit_session`] or [`discard_session`].
    pub grant: SignInGrantId,
}

#[cfg(feature = "ssr")]
mod backend {
    use crate::auth::AppState;
    use crate::error::SessionError;
    use axum::Extension;
    use axum::http::{HeaderValue, header::SET_COOKIE};
    use axum_extra::extract::CookieJar;
    use axum_extra::extract::cookie::{Cookie, SameSite};
    use hotel_portal_platform_access::SessionToken;
    use leptos::prelude::*;
    use leptos_axum::ResponseOptions;
    use std::sync::Arc;
    use time::Duration as TimeDuration;

    /// Session cookie name.
    pub const SESSION_COOKIE: &str = "session";

    pub async fn app_state() -> Result<Arc<AppState>, ServerFnError> {
        let Extension(state): Extension<Arc<AppState>> =
            leptos_axum::extract().await.map_err(|e| {
                tracing::error!(error = %e, "Application state missing from request");
                SessionError::MissingState.into_server_error()
            })?;
        Ok(state)
    }

    pub async fn session_token() -> Result<Option<SessionToken>, ServerFnError> {
        let jar: CookieJar = leptos_axum::extract().await?;
        Ok(jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .map(SessionToken::new))
    }

    pub fn session_cookie(
        token: &SessionToken,
        max_age: TimeDuration,
        secure: bool,
    ) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.as_str().to_string()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build()
    }

    pub fn removal_cookie(secure: bool) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .max_age(TimeDuration::ZERO)
            .build()
    }

    /// Revokes a token, logging instead of failing.
    pub async fn revoke(state: &AppState, token: &SessionToken, what: &'static str) {
        match tokio::time::timeout(state.request_timeout(), state.identity.sign_out(token)).await {
            Ok(Ok(())) => tracing::debug!(what, "Token revoked"),
            Ok(Err(e)) => tracing::warn!(error = %e, what, "Failed to revoke token"),
            Err(_) => tracing::warn!(what, "Timed out revoking token"),
        }
    }

    pub fn set_cookie(cookie: Cookie<'static>) -> Result<(), ServerFnError> {
        let value = HeaderValue::from_str(&cookie.to_string()).map_err(|e| {
            tracing::error!(error = %e, "Session cookie is not a valid header value");
            SessionError::Cookie {
                details: e.to_string(),
            }
            .into_server_error()
        })?;
        expect_context::<ResponseOptions>().append_header(SET_COOKIE, value);
        Ok(())
    }
}

/// Resolves the session cookie into the signed-in staff member.
///
/// Returns `None` when there is no cookie or the token is no longer valid;
/// in the latter case the cookie is cleared. Returns an error only when the
/// identity service could not answer, leaving the cookie in place for the
/// next attempt.
#[server]
pub async fn restore_session() -> Result<Option<Identity>, ServerFnError> {
    use backend::*;
    use crate::error::SessionError;
    use hotel_portal_platform_access::SessionRecoveryError;

    let Some(token) = session_token().await? else {
        return Ok(None);
    };
    let state = app_state().await?;

    let outcome = tokio::time::timeout(state.request_timeout(), state.identity.resolve(&token))
        .await
        .unwrap_or_else(|_| {
            Err(SessionRecoveryError::Unavailable {
                detail: format!(
                    "no answer within {}s",
                    state.session_config.request_timeout_seconds
                ),
            })
        });

    match outcome {
        Ok(identity) => {
            tracing::debug!(
                staff_id = %identity.staff_id(),
                role = ?identity.role(),
                "Restored session"
            );
            Ok(Some(identity))
        }
        Err(SessionRecoveryError::Unavailable { detail }) => {
            tracing::warn!(
                error = %detail,
                service = state.identity.service_name(),
                "Could not restore session"
            );
            Err(SessionError::ServiceUnavailable { details: detail }.into_server_error())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unusable session cookie");
            set_cookie(removal_cookie(state.session_config.secure_cookies))?;
            Ok(None)
        }
    }
}

/// Checks credentials against the identity service.
///
/// Authentication failures are returned as the inner `AuthError`; the outer
/// error is reserved for transport problems.
#[server]
pub async fn request_sign_in(
    email: String,
    password: String,
) -> Result<Result<PendingSignIn, AuthError>, ServerFnError> {
    use backend::*;
    use hotel_portal_platform_access::Credentials;

    let credentials = Credentials::new(&email, password);
    if credentials.is_incomplete() {
        return Ok(Err(AuthError::InvalidCredentials));
    }
    let state = app_state().await?;

    let outcome =
        tokio::time::timeout(state.request_timeout(), state.identity.sign_in(&credentials))
            .await
            .unwrap_or_else(|_| {
                Err(AuthError::Network {
                    detail: format!(
                        "no answer within {}s",
                        state.session_config.request_timeout_seconds
                    ),
                })
            });

    let signed_in = match outcome {
        Ok(signed_in) => signed_in,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(email = %credentials.email(), "Credentials rejected");
            return Ok(Err(AuthError::InvalidCredentials));
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                service = state.identity.service_name(),
                "Sign-in failed"
            );
            return Ok(Err(e));
        }
    };

    tracing::info!(
        staff_id = %signed_in.identity.staff_id(),
        role = ?signed_in.identity.role(),
        "Credentials accepted"
    );
    let (grant, expired) = state.grants.insert(signed_in.token, signed_in.expires_in);
    if !expired.is_empty() {
        tracing::debug!(count = expired.len(), "Revoking unclaimed sign-ins");
        let state = state.clone();
        tokio::spawn(async move {
            for token in &expired {
                revoke(&state, token, "unclaimed sign-in").await;
            }
        });
    }

    Ok(Ok(PendingSignIn {
        identity: signed_in.identity,
        grant,
    }))
}

/// Moves the token behind `grant` into the session cookie.
///
/// The cookie lives as long as the token, or for the configured cookie
/// lifetime when the identity service gave no expiry. Fails if the grant is
/// unknown, already claimed or expired.
#[server]
pub async fn commit_session(grant: SignInGrantId) -> Result<(), ServerFnError> {
    use backend::*;
    use crate::error::SessionError;
    use time::Duration as TimeDuration;

    let state = app_state().await?;
    let Some(pending) = state.grants.take(&grant) else {
        tracing::warn!(%grant, "Sign-in grant missing or expired");
        return Err(SessionError::UnknownGrant.into_server_error());
    };
    let max_age = pending
        .expires_in
        .filter(|seconds| *seconds > 0)
        .map(TimeDuration::seconds)
        .unwrap_or_else(|| TimeDuration::minutes(state.session_config.cookie_max_age_minutes));

    set_cookie(session_cookie(
        &pending.token,
        max_age,
        state.session_config.secure_cookies,
    ))?;
    tracing::debug!(max_age_seconds = max_age.whole_seconds(), "Session committed");
    Ok(())
}

/// Revokes the token behind a sign-in that was superseded before it
/// resolved. Discarding an unknown grant succeeds.
#[server]
pub async fn discard_session(grant: SignInGrantId) -> Result<(), ServerFnError> {
    use backend::*;

    let state = app_state().await?;
    if let Some(pending) = state.grants.take(&grant) {
        revoke(&state, &pending.token, "superseded sign-in").await;
    }
    Ok(())
}

/// Revokes the current session and clears the cookie.
///
/// Succeeds when nobody is signed in. A failed revocation is logged; the
/// cookie is cleared regardless.
#[server]
pub async fn request_sign_out() -> Result<(), ServerFnError> {
    use backend::*;

    let state = app_state().await?;
    if let Some(token) = session_token().await? {
        revoke(&state, &token, "session").await;
    }

    set_cookie(removal_cookie(state.session_config.secure_cookies))
}
