//! Public photo gallery with category filter and lightbox.

use hotel_portal_catalog::gallery::{next_index, prev_index};
use hotel_portal_catalog::{GalleryFilter, GalleryItem, showcase};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Gallery page. The active category comes from the `category` query
/// parameter so filtered views can be linked to.
#[component]
pub fn GalleryPage() -> impl IntoView {
    let items = StoredValue::new(showcase::gallery());
    let query = use_query_map();
    let filter = Memo::new(move |_| {
        query
            .with(|query| query.get("category"))
            .and_then(|value| value.parse::<GalleryFilter>().ok())
            .unwrap_or_default()
    });
    let visible = Memo::new(move |_| {
        let filter = filter.get();
        items.with_value(|items| {
            filter
                .apply(items)
                .into_iter()
                .cloned()
                .collect::<Vec<GalleryItem>>()
        })
    });
    let open = RwSignal::new(None::<usize>);

    // A new filter invalidates the open index.
    Effect::new(move || {
        filter.track();
        open.set(None);
    });

    let step = move |forward: bool| {
        let len = visible.with_untracked(Vec::len);
        open.update(|index| {
            *index = index.and_then(|current| {
                if forward {
                    next_index(current, len)
                } else {
                    prev_index(current, len)
                }
            });
        });
    };

    let keys = window_event_listener(leptos::ev::keydown, move |ev| {
        if open.get_untracked().is_none() {
            return;
        }
        match ev.key().as_str() {
            "ArrowRight" => step(true),
            "ArrowLeft" => step(false),
            "Escape" => open.set(None),
            _ => {}
        }
    });
    on_cleanup(move || keys.remove());

    view! {
        <div class="gallery-page">
            <h1>"Gallery"</h1>
            <nav class="filter-bar">
                {GalleryFilter::options().into_iter().map(|option| {
                    let href = match option {
                        GalleryFilter::All => "/gallery".to_string(),
                        GalleryFilter::Only(_) => format!("/gallery?category={}", option.as_str()),
                    };
                    view! {
                        <a
                            href=href
                            class="filter-button"
                            class:active=move || filter.get() == option
                        >
                            {option.label()}
                        </a>
                    }
                }).collect_view()}
            </nav>

            <div class="card-grid">
                <For
                    each=move || visible.get().into_iter().enumerate()
                    key=|(index, item)| (*index, item.id)
                    children=move |(index, item)| view! {
                        <button class="gallery-card" on:click=move |_| open.set(Some(index))>
                            <img src=item.image_url.clone() alt=item.title.clone() loading="lazy"/>
                            <span class="caption">{item.title.clone()}</span>
                        </button>
                    }
                />
            </div>
            <Show when=move || visible.with(Vec::is_empty)>
                <p class="empty">"No pictures in this category yet."</p>
            </Show>

            {move || {
                let current = open.get()?;
                let item = visible.with(|items| items.get(current).cloned())?;
                let total = visible.with(Vec::len);
                Some(view! {
                    <div class="lightbox" on:click=move |_| open.set(None)>
                        <div class="lightbox-body" on:click=|ev| ev.stop_propagation()>
                            <button class="lightbox-close" on:click=move |_| open.set(None)>"\u{00d7}"</button>
                            <button class="lightbox-prev" on:click=move |_| step(false)>"\u{2039}"</button>
                            <img src=item.image_url alt=item.title.clone()/>
                            <button class="lightbox-next" on:click=move |_| step(true)>"\u{203a}"</button>
                            <div class="lightbox-caption">
                                <h2>{item.title}</h2>
                                <p>{item.description}</p>
                                <span class="counter">{format!("{} / {}", current + 1, total)}</span>
                            </div>
                        </div>
                    </div>
                })
            }}
        </div>
    }
}
