//! Public landing page.

use hotel_portal_catalog::showcase::{self, HERO_IMAGE, HOTEL_NAME, TAGLINE};
use hotel_portal_catalog::social;
use leptos::prelude::*;

/// The hotel's front page.
#[component]
pub fn LandingPage() -> impl IntoView {
    let featured = showcase::featured_gallery();
    let testimonials = showcase::testimonials();
    let links = showcase::social_links();
    let accounts: Vec<_> = social::active(&links).into_iter().cloned().collect();

    view! {
        <div class="landing-page">
            <section class="hero" style=format!("background-image: url('{HERO_IMAGE}')")>
                <div class="hero-overlay">
                    <h1>{HOTEL_NAME}</h1>
                    <p class="tagline">{TAGLINE}</p>
                    <a href="/gallery" class="cta-button">"Explore the Hotel"</a>
                </div>
            </section>

            <section class="featured">
                <h2>"A Glimpse Inside"</h2>
                <div class="card-grid">
                    {featured.into_iter().map(|item| view! {
                        <figure class="gallery-card">
                            <img src=item.image_url alt=item.title.clone() loading="lazy"/>
                            <figcaption>{item.title}</figcaption>
                        </figure>
                    }).collect_view()}
                </div>
                <a href="/gallery" class="link-button">"View the full gallery"</a>
            </section>

            <section class="testimonials">
                <h2>"What Our Guests Say"</h2>
                <div class="card-grid">
                    {testimonials.into_iter().map(|testimonial| {
                        let stars = "\u{2605}".repeat(usize::from(testimonial.rating));
                        view! {
                            <blockquote class="testimonial">
                                <img class="avatar" src=testimonial.avatar_url alt=""/>
                                <p>{testimonial.comment}</p>
                                <footer>
                                    <span class="rating">{stars}</span>
                                    <cite>{testimonial.name}</cite>
                                </footer>
                            </blockquote>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="follow-us">
                <h2>"Follow Us"</h2>
                <ul class="social-strip">
                    {accounts.into_iter().map(|link| view! {
                        <li>
                            <a href=link.url rel="external noopener" target="_blank">
                                {link.platform.label()}
                            </a>
                        </li>
                    }).collect_view()}
                </ul>
                <a href="/social" class="link-button">"All our channels"</a>
            </section>
        </div>
    }
}
