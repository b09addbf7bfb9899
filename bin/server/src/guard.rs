//! Route guard component.
//!
//! [`ProtectedRoute`] looks the current path up in the [`RouteTable`] from
//! context and renders its children only when [`RouteTable::evaluate`] says
//! so. A missing table or a path the table does not protect is treated as a
//! denial rather than as a public page.

use crate::session::use_session;
use hotel_portal_platform_access::{Decision, RouteTable, SIGN_IN_PATH, UNAUTHORIZED_PATH};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

/// Renders `children` for staff allowed on the current path.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let routes = use_context::<RouteTable>();
    let location = use_location();

    let decision = Memo::new(move |_| {
        let path = location.pathname.get();
        let state = session.state();
        match &routes {
            Some(routes) if routes.is_protected(&path) => routes.evaluate(&path, &state),
            Some(_) => {
                leptos::logging::error!("guarded view mounted on unprotected path {path}");
                Decision::RedirectToUnauthorized
            }
            None => {
                leptos::logging::error!("route table missing from context");
                Decision::RedirectToUnauthorized
            }
        }
    });

    move || match decision.get() {
        Decision::Render => children().into_any(),
        Decision::Pending => view! {
            <div class="guard-pending" aria-busy="true">
                <div class="spinner"></div>
                <p>"Checking your session..."</p>
            </div>
        }
        .into_any(),
        Decision::RedirectToSignIn => {
            let target = sign_in_redirect(&location.pathname.get_untracked());
            view! { <Redirect path=target/> }.into_any()
        }
        Decision::RedirectToUnauthorized => {
            view! { <Redirect path=UNAUTHORIZED_PATH/> }.into_any()
        }
    }
}

/// Builds the sign-in URL that returns to `path` afterwards.
pub fn sign_in_redirect(path: &str) -> String {
    match safe_return_path(Some(path)) {
        Some(path) => format!("{SIGN_IN_PATH}?next={}", encode_query_value(&path)),
        None => SIGN_IN_PATH.to_string(),
    }
}

/// Accepts a post-sign-in destination only if it stays on this site.
///
/// The path must be absolute, must not be protocol-relative and must not
/// point back at the sign-in page.
pub fn safe_return_path(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    if !next.starts_with('/') || next.starts_with("//") || next.contains('\\') {
        return None;
    }
    let path_only = next.split(['?', '#']).next().unwrap_or_default();
    if path_only.trim_end_matches('/') == SIGN_IN_PATH {
        return None;
    }
    Some(next.to_string())
}

fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
