//! Staff dashboards.

use crate::session::use_session;
use hotel_portal_catalog::booking::BookingSummary;
use hotel_portal_catalog::showcase;
use hotel_portal_platform_access::Role;
use leptos::prelude::*;

/// Management overview for super admins.
#[component]
pub fn SuperAdminDashboard() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .identity()
            .map(|identity| format!("Welcome back, {}", identity.name()))
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Super Admin Dashboard"</h1>
                <p class="muted">{greeting}</p>
            </header>

            <section class="stat-grid">
                {showcase::dashboard_stats().into_iter().map(|stat| {
                    let trend = if stat.change_percent >= 0 { "trend up" } else { "trend down" };
                    view! {
                        <div class="stat-card">
                            <span class="stat-label">{stat.label.clone()}</span>
                            <span class="stat-value">{stat.value.to_string()}</span>
                            <span class=trend>{stat.change_label()}</span>
                        </div>
                    }
                }).collect_view()}
            </section>

            <section class="quick-actions">
                <h2>"Quick Actions"</h2>
                <div class="card-grid">
                    {showcase::quick_actions().into_iter().map(|action| view! {
                        <div class="action-card">
                            <h3>{action.label}</h3>
                            <p>{action.description}</p>
                        </div>
                    }).collect_view()}
                </div>
            </section>

            <section class="recent-bookings">
                <h2>"Recent Bookings"</h2>
                <table>
                    <thead>
                        <tr>
                            <th>"Guest"</th>
                            <th>"Room"</th>
                            <th>"Check-in"</th>
                            <th>"Status"</th>
                            <th>"Amount"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {showcase::recent_bookings().into_iter().map(booking_row).collect_view()}
                    </tbody>
                </table>
            </section>
        </div>
    }
}

fn booking_row(booking: BookingSummary) -> impl IntoView {
    view! {
        <tr>
            <td>{booking.guest_name}</td>
            <td>{booking.room_name}</td>
            <td>{booking.check_in.format("%b %-d, %Y").to_string()}</td>
            <td><span class=format!("status {}", booking.status.as_str())>{booking.status.label()}</span></td>
            <td>{booking.amount.to_string()}</td>
        </tr>
    }
}

/// Dashboard for roles whose tools are not built yet.
#[component]
pub fn StaffPlaceholder(role: Role) -> impl IntoView {
    view! {
        <div class="dashboard placeholder">
            <h1>{format!("{} Dashboard", role.label())}</h1>
            <p class="muted">"Coming soon..."</p>
        </div>
    }
}
