pub mod embed;
pub mod error;
pub mod render;
pub mod routes;
pub mod site;
pub mod state;
pub mod templates;
pub mod view;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all pages, API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/case-studies", get(routes::api::list_case_studies))
        .route("/api/case-studies/{slug}", get(routes::api::get_case_study))
        .route("/api/filters", get(routes::api::get_filters))
        .layer(cors);

    Router::new()
        // Pages
        .route("/", get(routes::pages::landing))
        .route("/work", get(routes::pages::listing))
        .route("/work/cards", get(routes::pages::cards))
        .route("/work/{slug}", get(routes::pages::detail))
        // Social previews
        .route("/og", get(routes::og::site_card))
        .route("/og/{slug}", get(routes::og::case_study_card))
        // Documents
        .route("/documents/{slug}", get(routes::documents::download))
        .route("/healthz", get(routes::api::healthz))
        .merge(api)
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the site server for the project at `root`.
pub async fn serve(root: &Path, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the site server on a pre-bound listener.
///
/// Accepting an already bound `TcpListener` lets the caller read the actual
/// port first (useful with `port = 0`).
pub async fn serve_on(
    root: &Path,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = AppState::load(root)?;
    tracing::info!(site = app_state.site.name(), "folio listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, build_router(app_state)).await?;
    Ok(())
}
