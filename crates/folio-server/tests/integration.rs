use async_trait::async_trait;
use axum::http::StatusCode;
use folio_core::blocks::ContentBlock;
use folio_core::config::Config;
use folio_core::filter::AvailableFilters;
use folio_core::memory::MemorySource;
use folio_core::source::{ContentSource, Page};
use folio_core::types::{CaseStudy, DocumentRef};
use folio_core::FolioError;
use folio_server::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Eight records: the first three React, the rest Vue, one of them with a
/// write-up attached.
fn fixtures() -> Vec<CaseStudy> {
    (0..8)
        .map(|i| {
            let tech = if i < 3 { "React" } else { "Vue" };
            let industry = if i % 2 == 0 { "Fintech" } else { "Health" };
            let mut r = CaseStudy::new(format!("case-{i}"), format!("Case study {i}"))
                .with_priority(i as f64)
                .with_tech([tech])
                .with_industry([industry]);
            r.summary = format!("Summary for case {i}");
            if i == 0 {
                r.sections.overview = vec![ContentBlock::paragraph("How it started")];
                r.document = Some(DocumentRef {
                    url: "https://cdn.example/case-0.pdf".into(),
                    filename: Some("case-0.pdf".into()),
                });
            }
            r
        })
        .collect()
}

fn app_with(source: Arc<dyn ContentSource>) -> axum::Router {
    build_router(AppState::new(Config::new("Jane Doe"), source).unwrap())
}

fn app() -> axum::Router {
    app_with(Arc::new(MemorySource::new(fixtures())))
}

struct Response {
    status: StatusCode,
    headers: axum::http::HeaderMap,
    body: String,
}

impl Response {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send a GET request via `oneshot` and collect the response.
async fn get(app: axum::Router, uri: &str) -> Response {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    Response {
        status,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn card_count(html: &str) -> usize {
    html.matches("<article class=\"card\">").count()
}

/// Source whose every call fails.
struct DownSource;

#[async_trait]
impl ContentSource for DownSource {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn fetch_all(&self) -> folio_core::Result<Vec<CaseStudy>> {
        Err(FolioError::Source("connection refused".into()))
    }

    async fn fetch_by_slug(&self, _slug: &str) -> folio_core::Result<Option<CaseStudy>> {
        Err(FolioError::Source("connection refused".into()))
    }

    async fn fetch_page(&self, _offset: usize, _limit: usize) -> folio_core::Result<Page> {
        Err(FolioError::Source("connection refused".into()))
    }

    async fn fetch_available_filters(&self) -> folio_core::Result<AvailableFilters> {
        Err(FolioError::Source("connection refused".into()))
    }
}

/// Source that cannot serve `case-1`: pages still cover its position but
/// omit the record, the way a store drops unaddressable documents.
struct GappySource(MemorySource);

#[async_trait]
impl ContentSource for GappySource {
    fn name(&self) -> &'static str {
        "gappy"
    }

    async fn fetch_all(&self) -> folio_core::Result<Vec<CaseStudy>> {
        let mut all = self.0.fetch_all().await?;
        all.retain(|r| r.slug != "case-1");
        Ok(all)
    }

    async fn fetch_by_slug(&self, slug: &str) -> folio_core::Result<Option<CaseStudy>> {
        self.0.fetch_by_slug(slug).await
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> folio_core::Result<Page> {
        let mut page = self.0.fetch_page(offset, limit).await?;
        page.records.retain(|r| r.slug != "case-1");
        Ok(page)
    }

    async fn fetch_available_filters(&self) -> folio_core::Result<AvailableFilters> {
        self.0.fetch_available_filters().await
    }
}

fn gappy_app() -> axum::Router {
    app_with(Arc::new(GappySource(MemorySource::new(fixtures()))))
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn healthz_returns_ok() {
    let res = get(app(), "/healthz").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "ok");
}

#[tokio::test]
async fn landing_shows_featured_case_studies() {
    let res = get(app(), "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Jane Doe"));
    assert_eq!(card_count(&res.body), 3);
    assert!(res.body.contains("/work/case-0"));
}

#[tokio::test]
async fn listing_without_filters_renders_first_page() {
    let res = get(app(), "/work").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(card_count(&res.body), 6);
    assert!(res.body.contains("data-has-more=\"true\""));
    assert!(res.body.contains("data-next-offset=\"6\""));
    assert!(res.body.contains("id=\"sentinel\""));
    assert!(res.body.contains("data-threshold=\"400\""));
}

#[tokio::test]
async fn listing_filters_the_complete_catalog() {
    let res = get(app(), "/work?techStack=Vue").await;
    assert_eq!(res.status, StatusCode::OK);
    // All five Vue records, including those past the first page.
    assert_eq!(card_count(&res.body), 5);
    assert!(res.body.contains("/work/case-7"));
    assert!(!res.body.contains("id=\"sentinel\""));
    assert!(res.body.contains("1 active"));
}

#[tokio::test]
async fn listing_combines_facets() {
    let res = get(app(), "/work?techStack=React&industry=Health").await;
    assert_eq!(card_count(&res.body), 1);
    assert!(res.body.contains("/work/case-1"));
    assert!(res.body.contains("2 active"));
}

#[tokio::test]
async fn listing_with_no_matches_offers_clear_all() {
    let res = get(app(), "/work?techStack=Svelte&utm_source=mail").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(card_count(&res.body), 0);
    assert!(res.body.contains("No case studies match"));
    assert!(res.body.contains("href=\"/work?utm_source=mail\""));
}

#[tokio::test]
async fn listing_survives_a_failing_source() {
    let res = get(app_with(Arc::new(DownSource)), "/work").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Check back later"));
}

#[tokio::test]
async fn card_fragment_pages_in_the_rest() {
    let res = get(app(), "/work/cards?offset=6&limit=6").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(card_count(&res.body), 2);
    assert_eq!(res.header("x-has-more"), Some("false"));
    assert_eq!(res.header("x-next-offset"), Some("8"));
    assert!(!res.body.contains("<html"));
}

#[tokio::test]
async fn offsets_count_positions_not_rendered_cards() {
    let listing = get(gappy_app(), "/work").await;
    assert_eq!(card_count(&listing.body), 5);
    assert!(listing.body.contains("data-next-offset=\"6\""));

    let cards = get(gappy_app(), "/work/cards?offset=0&limit=6").await;
    assert_eq!(card_count(&cards.body), 5);
    assert_eq!(cards.header("x-next-offset"), Some("6"));

    let api = get(gappy_app(), "/api/case-studies?limit=6").await.json();
    assert_eq!(api["records"].as_array().unwrap().len(), 5);
    assert_eq!(api["next_offset"], 6);

    let rest = get(gappy_app(), "/api/case-studies?offset=6&limit=6").await.json();
    assert_eq!(rest["records"][0]["slug"], "case-6");
}

#[tokio::test]
async fn card_fragment_rejects_zero_limit() {
    let res = get(app(), "/work/cards?offset=0&limit=0").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_renders_sections() {
    let res = get(app(), "/work/case-0").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Case study 0"));
    assert!(res.body.contains("<p>How it started</p>"));
    assert!(res.body.contains("/documents/case-0"));
    assert!(res.body.contains("/og/case-0"));
}

#[tokio::test]
async fn unknown_detail_is_a_404_page() {
    let res = get(app(), "/work/missing-slug").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.contains("Not found"));
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_pages_concatenate() {
    let first = get(app(), "/api/case-studies?limit=6").await.json();
    assert_eq!(first["records"].as_array().unwrap().len(), 6);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["next_offset"], 6);

    let second = get(app(), "/api/case-studies?offset=6&limit=6").await.json();
    assert_eq!(second["records"].as_array().unwrap().len(), 2);
    assert_eq!(second["has_more"], false);
    assert_eq!(second["records"][0]["slug"], "case-6");
}

#[tokio::test]
async fn api_rejects_out_of_range_limit() {
    let res = get(app(), "/api/case-studies?limit=51").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn api_offset_past_end_is_empty() {
    let body = get(app(), "/api/case-studies?offset=100&limit=6").await.json();
    assert_eq!(body["records"].as_array().unwrap().len(), 0);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn api_get_case_study() {
    let found = get(app(), "/api/case-studies/case-3").await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json()["title"], "Case study 3");

    let missing = get(app(), "/api/case-studies/missing-slug").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_filters_lists_distinct_values() {
    let body = get(app(), "/api/filters").await.json();
    assert_eq!(body["tech_stack"], serde_json::json!(["React", "Vue"]));
    assert_eq!(body["industry"], serde_json::json!(["Fintech", "Health"]));
}

#[tokio::test]
async fn api_fails_open() {
    let body = get(app_with(Arc::new(DownSource)), "/api/case-studies").await;
    assert_eq!(body.status, StatusCode::OK);
    assert_eq!(body.json()["records"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Previews, documents, assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn og_images_are_svg() {
    let site = get(app(), "/og").await;
    assert_eq!(site.status, StatusCode::OK);
    assert_eq!(site.header("content-type"), Some("image/svg+xml"));

    let card = get(app(), "/og/case-2").await;
    assert!(card.body.contains("Case study 2"));

    let missing = get(app(), "/og/missing-slug").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn documents_redirect_or_404() {
    let res = get(app(), "/documents/case-0").await;
    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.header("location"), Some("https://cdn.example/case-0.pdf"));

    let none = get(app(), "/documents/case-1").await;
    assert_eq!(none.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn embedded_assets_are_served() {
    let js = get(app(), "/assets/app.js").await;
    assert_eq!(js.status, StatusCode::OK);
    assert!(js.body.contains("IntersectionObserver"));

    let css = get(app(), "/assets/site.css").await;
    assert!(css.header("content-type").unwrap().starts_with("text/css"));
}

#[tokio::test]
async fn unknown_paths_get_the_404_page() {
    let res = get(app(), "/nope").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.contains("<html"));
}
