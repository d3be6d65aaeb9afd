use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::pages::not_found_page;
use crate::render::blocks::is_safe_href;
use crate::state::AppState;

/// GET /documents/{slug} — temporary redirect to the attached write-up.
pub async fn download(State(app): State<AppState>, Path(slug): Path<String>) -> Response {
    let document = app
        .catalog
        .fetch_by_slug(&slug)
        .await
        .and_then(|record| record.document)
        .filter(|doc| is_safe_href(&doc.url));
    match document {
        Some(doc) => Redirect::temporary(&doc.url).into_response(),
        None => not_found_page(&app.site, "This case study has no downloadable document."),
    }
}
