//! Public social media page.

use hotel_portal_catalog::showcase;
use hotel_portal_catalog::social;
use leptos::prelude::*;

/// Lists the hotel's active social accounts.
#[component]
pub fn SocialPage() -> impl IntoView {
    let links = showcase::social_links();
    let accounts: Vec<_> = social::active(&links).into_iter().cloned().collect();

    view! {
        <div class="social-page">
            <h1>"Stay Connected"</h1>
            <p>"Follow us for offers, events and a look behind the scenes."</p>
            <div class="card-grid">
                {accounts.into_iter().map(|link| {
                    let followers = link.followers.clone().map(|count| view! {
                        <span class="followers">{format!("{count} followers")}</span>
                    });
                    view! {
                        <a class="social-card" href=link.url rel="external noopener" target="_blank">
                            <h2>{link.platform.label()}</h2>
                            <span class="handle">{link.handle}</span>
                            {followers}
                        </a>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}
