//! Page shown when a signed-in staff member lacks the required role.

use crate::session::use_session;
use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="unauthorized-page">
            <h1>"Access Denied"</h1>
            <p>"Your account does not have permission to view that page."</p>
            {move || match session.identity() {
                Some(identity) => {
                    let role = identity
                        .role()
                        .map(|role| role.label())
                        .unwrap_or("no recognised role");
                    let home = identity.home_path().map(|path| view! {
                        <a href=path class="cta-button">"Go to my dashboard"</a>
                    });
                    view! {
                        <p class="muted">{format!("Signed in as {} ({role}).", identity.name())}</p>
                        {home}
                    }
                    .into_any()
                }
                None => view! { <a href="/login" class="cta-button">"Staff Login"</a> }.into_any(),
            }}
            <a href="/" class="link-button">"Back to the hotel"</a>
        </div>
    }
}
