//! Main Leptos application component and routing.

use crate::guard::ProtectedRoute;
use crate::pages::{
    GalleryPage, LandingPage, LoginPage, SocialPage, StaffPlaceholder, SuperAdminDashboard,
    UnauthorizedPage,
};
use crate::session::{provide_session, use_session};
use hotel_portal_catalog::showcase::{self, HOTEL_NAME};
use hotel_portal_catalog::social;
use hotel_portal_platform_access::{
    ConfigurationError, Role, RouteTable, SIGN_IN_PATH, SessionState, SignOutOutcome,
};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;

/// Builds the allow-lists for the staff dashboards.
///
/// Super admins are added to every entry by the table itself.
pub fn staff_route_table() -> Result<RouteTable, ConfigurationError> {
    RouteTable::builder()
        .protect(Role::SuperAdmin.dashboard_path(), [Role::SuperAdmin])
        .protect(Role::Supervisor.dashboard_path(), [Role::Supervisor])
        .protect(Role::Receptionist.dashboard_path(), [Role::Receptionist])
        .protect(Role::Barman.dashboard_path(), [Role::Barman])
        .build()
}

/// The main application component.
///
/// Expects a [`RouteTable`] in context. The session starts out `Loading` on
/// both server and client; recovery only runs in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let session = provide_session();

    Effect::new(move || session.initialize());

    view! {
        <Title text=HOTEL_NAME/>
        <Router>
            <Navbar/>
            <main class="container">
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=LandingPage/>
                    <Route path=path!("/gallery") view=GalleryPage/>
                    <Route path=path!("/social") view=SocialPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/unauthorized") view=UnauthorizedPage/>
                    <Route
                        path=path!("/superadmin")
                        view=|| view! { <ProtectedRoute><SuperAdminDashboard/></ProtectedRoute> }
                    />
                    <Route
                        path=path!("/supervisor")
                        view=|| view! {
                            <ProtectedRoute><StaffPlaceholder role=Role::Supervisor/></ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/receptionist")
                        view=|| view! {
                            <ProtectedRoute><StaffPlaceholder role=Role::Receptionist/></ProtectedRoute>
                        }
                    />
                    <Route
                        path=path!("/barman")
                        view=|| view! {
                            <ProtectedRoute><StaffPlaceholder role=Role::Barman/></ProtectedRoute>
                        }
                    />
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

/// Top navigation with the staff session controls.
#[component]
fn Navbar() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        if session.sign_out() == SignOutOutcome::SignedOut {
            navigate(
                "/",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    };

    view! {
        <header class="navbar">
            <a href="/" class="logo">{HOTEL_NAME}</a>
            <nav class="nav-links">
                <a href="/">"Home"</a>
                <a href="/gallery">"Gallery"</a>
                <a href="/social">"Social"</a>
            </nav>
            <div class="nav-session">
                {move || match session.state() {
                    SessionState::Loading => view! { <span class="muted">"..."</span> }.into_any(),
                    SessionState::Unauthenticated => view! {
                        <a href=SIGN_IN_PATH class="login-button">"Staff Login"</a>
                    }
                    .into_any(),
                    SessionState::Authenticated(identity) => {
                        let dashboard = identity.home_path().map(|path| view! {
                            <a href=path>"Dashboard"</a>
                        });
                        let on_sign_out = on_sign_out.clone();
                        view! {
                            <div class="user-menu">
                                <span class="user-name">{identity.name().to_string()}</span>
                                {dashboard}
                                <button class="link-button" on:click=on_sign_out>"Sign Out"</button>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let links = showcase::social_links();
    let accounts: Vec<_> = social::active(&links).into_iter().cloned().collect();

    view! {
        <footer class="footer">
            <span>{format!("\u{a9} {HOTEL_NAME}. All rights reserved.")}</span>
            <ul class="social-strip">
                {accounts.into_iter().map(|link| view! {
                    <li><a href=link.url rel="external noopener" target="_blank">{link.platform.label()}</a></li>
                }).collect_view()}
            </ul>
        </footer>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <a href="/" class="link-button">"Back to the hotel"</a>
        </div>
    }
}
