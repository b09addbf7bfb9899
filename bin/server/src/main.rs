#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{Extension, Router};
    use hotel_portal_server::{
        app::{App, staff_route_table},
        auth::{AppState, HostedIdentityService},
        config::ServerConfig,
    };
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use std::sync::Arc;
    use tower::ServiceBuilder;
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let route_table = staff_route_table().expect("invalid route table");
    for (path, roles) in route_table.protected_paths() {
        tracing::debug!(path, roles = ?roles, "Protected route");
    }

    let identity = HostedIdentityService::new(config.identity, config.session.request_timeout())
        .expect("invalid identity service configuration");
    tracing::info!(
        timeout_seconds = config.session.request_timeout_seconds,
        "Identity service client ready"
    );

    let app_state = Arc::new(AppState::new(Arc::new(identity), config.session));

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(route_table.clone()),
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler::<LeptosOptions, _>(shell))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Server functions reach the identity client through this extension
        .layer(ServiceBuilder::new().layer(Extension(app_state)))
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use hotel_portal_server::app::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/hotel-portal.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
