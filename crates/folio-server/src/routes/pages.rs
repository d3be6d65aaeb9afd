use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use folio_core::filter;
use folio_core::location::{FilterStore, PageLocation};
use tera::Context;

use super::PageParams;
use crate::site::SiteContext;
use crate::state::AppState;
use crate::view;

/// Served when even the error template cannot be rendered.
const FALLBACK_ERROR_HTML: &str = "<!DOCTYPE html><html><body><h1>Something went wrong</h1>\
<p>This page could not be displayed.</p><a href=\"\">Retry</a></body></html>";

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Render `template`, falling back to the generic error page when rendering
/// fails.
pub fn render_page(site: &SiteContext, template: &str, ctx: &Context, status: StatusCode) -> Response {
    match site.render(template, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(template, error = ?e, "template render failed");
            render_failure(site)
        }
    }
}

/// Generic "something went wrong, retry" page with status 500.
pub fn render_failure(site: &SiteContext) -> Response {
    let html = site
        .render("error.html", &site.context())
        .unwrap_or_else(|_| FALLBACK_ERROR_HTML.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
}

pub fn not_found_page(site: &SiteContext, message: &str) -> Response {
    let mut ctx = site.context();
    ctx.insert("message", message);
    render_page(site, "not_found.html", &ctx, StatusCode::NOT_FOUND)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET / — headline plus the top few case studies.
pub async fn landing(State(app): State<AppState>) -> Response {
    let page = app.catalog.fetch_page(0, app.site.featured).await;
    let mut ctx = app.site.context();
    ctx.insert("cards", &view::cards(&page.records));
    render_page(&app.site, "landing.html", &ctx, StatusCode::OK)
}

/// GET /work — filterable listing.
///
/// With no filters the first page is rendered and the browser pages in the
/// rest. With filters active the complete catalog is filtered, so the result
/// never depends on how far the visitor had scrolled.
pub async fn listing(State(app): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let store = FilterStore::new(PageLocation::new("/work", query.as_deref()));
    let page_size = app.site.page_size;

    let (available, (records, has_more, next_offset)) = tokio::join!(
        app.catalog.fetch_available_filters(),
        async {
            if store.filters().is_empty() {
                let page = app.catalog.fetch_page(0, page_size).await;
                let next_offset = page.next_offset(0);
                (page.records, page.has_more, next_offset)
            } else {
                let all = app.catalog.fetch_all().await;
                let matched = filter::apply(&all, store.filters()).into_owned();
                let next_offset = matched.len();
                (matched, false, next_offset)
            }
        }
    );

    let mut ctx = app.site.context();
    ctx.insert("facets", &view::facets(&store, &available));
    ctx.insert("chips", &view::chips(&store));
    ctx.insert("clear_href", &view::clear_href(&store));
    ctx.insert("active_count", &store.active_filter_count());
    ctx.insert("cards", &view::cards(&records));
    ctx.insert("has_more", &has_more);
    ctx.insert("next_offset", &next_offset);
    ctx.insert("page_size", &page_size);
    render_page(&app.site, "listing.html", &ctx, StatusCode::OK)
}

/// GET /work/cards?offset=&limit= — card markup for infinite scroll.
///
/// `x-has-more` and `x-next-offset` tell the script whether and where to
/// continue.
pub async fn cards(State(app): State<AppState>, Query(params): Query<PageParams>) -> Response {
    let limit = match params.limit(app.site.page_size) {
        Ok(limit) => limit,
        Err(e) => return e.into_response(),
    };
    let offset = params.offset();
    let page = app.catalog.fetch_page(offset, limit).await;

    let mut ctx = app.site.context();
    ctx.insert("cards", &view::cards(&page.records));
    let mut response = render_page(&app.site, "cards.html", &ctx, StatusCode::OK);
    if response.status().is_success() {
        let headers = response.headers_mut();
        headers.insert("x-has-more", HeaderValue::from_static(if page.has_more { "true" } else { "false" }));
        headers.insert("x-next-offset", HeaderValue::from(page.next_offset(offset)));
    }
    response
}

/// GET /work/{slug} — case-study detail.
pub async fn detail(State(app): State<AppState>, Path(slug): Path<String>) -> Response {
    let missing = || not_found_page(&app.site, &format!("There is no case study called '{slug}'."));
    if folio_core::paths::validate_slug(&slug).is_err() {
        return missing();
    }
    let Some(record) = app.catalog.fetch_by_slug(&slug).await else {
        return missing();
    };

    let page = view::DetailPage::from(&record);
    let mut ctx = app.site.context();
    match Context::from_serialize(&page) {
        Ok(page_ctx) => ctx.extend(page_ctx),
        Err(e) => {
            tracing::error!(slug = %record.slug, error = ?e, "failed to build detail context");
            return render_failure(&app.site);
        }
    }
    ctx.insert(
        "og_image",
        &app.site.absolute_url(&format!("/og/{}", record.slug)),
    );
    render_page(&app.site, "detail.html", &ctx, StatusCode::OK)
}
