use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::filter::AvailableFilters;
use folio_core::types::CaseStudy;
use serde::Serialize;

use super::PageParams;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub records: Vec<CaseStudy>,
    pub has_more: bool,
    pub next_offset: usize,
}

/// GET /api/case-studies?offset=&limit= — one page in priority order.
pub async fn list_case_studies(
    State(app): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse>, AppError> {
    let limit = params.limit(app.site.page_size)?;
    let offset = params.offset();
    let page = app.catalog.fetch_page(offset, limit).await;
    Ok(Json(PageResponse {
        next_offset: page.next_offset(offset),
        has_more: page.has_more,
        records: page.records,
    }))
}

/// GET /api/case-studies/{slug} — full record.
pub async fn get_case_study(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CaseStudy>, AppError> {
    app.catalog
        .fetch_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("case study '{slug}' not found")))
}

/// GET /api/filters — distinct facet values.
pub async fn get_filters(State(app): State<AppState>) -> Json<AvailableFilters> {
    Json(app.catalog.fetch_available_filters().await)
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
