use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::render::og::{self, OgCard};
use crate::state::AppState;

fn svg_response(svg: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        svg,
    )
        .into_response()
}

/// GET /og — site-wide preview card.
pub async fn site_card(State(app): State<AppState>) -> Response {
    let filters = app.catalog.fetch_available_filters().await;
    let intro = app.site.intro();
    let card = OgCard {
        eyebrow: app.site.name().to_string(),
        title: app.site.headline().to_string(),
        subtitle: Some(if intro.is_empty() { app.site.title() } else { intro }.to_string()),
        tags: filters.tech_stack.into_iter().collect(),
    };
    svg_response(og::render(&card, app.site.theme()))
}

/// GET /og/{slug} — preview card for one case study.
pub async fn case_study_card(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let record = app
        .catalog
        .fetch_by_slug(&slug)
        .await
        .ok_or_else(|| AppError::not_found(format!("case study '{slug}' not found")))?;
    let description = record.description();
    let card = OgCard {
        eyebrow: format!("{} · Case study", app.site.name()),
        title: record.title,
        subtitle: (!description.is_empty()).then_some(description),
        tags: record.tech_stack,
    };
    Ok(svg_response(og::render(&card, app.site.theme())))
}
