//! Hotel Grandeur web server and UI.
//!
//! This crate provides the Leptos-based public site and the role-gated staff
//! dashboards, along with the server functions that keep the staff session
//! in an HTTP-only cookie.

#![allow(non_snake_case)]

pub mod app;
pub mod guard;
pub mod pages;
pub mod session;
pub mod user;

#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::{App, staff_route_table};
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    match staff_route_table() {
        Ok(routes) => leptos::mount::hydrate_body(move || {
            provide_context(routes.clone());
            view! { <App/> }
        }),
        Err(e) => leptos::logging::error!("invalid route table: {e}"),
    }
}
