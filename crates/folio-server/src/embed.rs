use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

use crate::routes::pages::not_found_page;
use crate::state::AppState;

#[derive(Embed)]
#[folder = "assets/"]
struct SiteAssets;

/// Serve embedded `/assets/...` files. Anything else gets the 404 page.
pub async fn static_handler(State(app): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(asset) = path.strip_prefix("assets/") {
        if let Some(content) = <SiteAssets as Embed>::get(asset) {
            let mime = mime_guess::from_path(asset).first_or_octet_stream();
            return (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, "public, max-age=300"),
                ],
                content.data.to_vec(),
            )
                .into_response();
        }
    }

    not_found_page(&app.site, "This page does not exist.")
}
