//! Staff sign-in page.

use crate::guard::safe_return_path;
use crate::session::use_session;
use hotel_portal_platform_access::{AuthError, Credentials};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

/// Email and password form for staff.
///
/// Once the session is authenticated the page moves on to the `next` query
/// path, or to the staff member's own dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let query = use_query_map();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<&'static str>::None);

    Effect::new(move || {
        let Some(identity) = session.identity() else {
            return;
        };
        let next = query.with(|query| query.get("next"));
        let destination = safe_return_path(next.as_deref())
            .or_else(|| identity.home_path().map(str::to_string))
            .unwrap_or_else(|| "/".to_string());
        navigate(
            &destination,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials::new(&email.get_untracked(), password.get_untracked());
        if credentials.is_incomplete() {
            set_error.set(Some("Please enter your email and password."));
            return;
        }
        set_error.set(None);
        spawn_local(async move {
            match session.sign_in(credentials).await {
                Ok(_) => set_password.set(String::new()),
                // A newer attempt or a sign-out owns the form now.
                Err(AuthError::Superseded) => {}
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-box" on:submit=on_submit>
                <h1>"Staff Login"</h1>
                <p>"Sign in with the account issued by hotel management."</p>
                {move || error.get().map(|message| view! {
                    <p class="form-error" role="alert">{message}</p>
                })}
                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    autocomplete="username"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="login-button" disabled=move || session.is_signing_in()>
                    {move || if session.is_signing_in() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
