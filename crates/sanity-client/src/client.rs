use crate::document::{RawFacets, SanityDoc};
use crate::error::SanityError;
use crate::queries;
use crate::Result;
use async_trait::async_trait;
use folio_core::config::SanitySourceConfig;
use folio_core::filter::AvailableFilters;
use folio_core::source::{ContentSource, Page};
use folio_core::types::CaseStudy;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Read-only client for the Sanity HTTP query API.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    project_id: String,
    dataset: String,
    document_type: String,
}

impl SanityClient {
    pub fn new(cfg: &SanitySourceConfig) -> Result<Self> {
        if cfg.project_id.trim().is_empty() {
            return Err(SanityError::Config("project_id is empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let host = if cfg.use_cdn { "apicdn" } else { "api" };
        let base_url = format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            cfg.project_id, cfg.api_version, cfg.dataset
        );
        Ok(Self {
            http,
            base_url,
            token: cfg.token(),
            project_id: cfg.project_id.clone(),
            dataset: cfg.dataset.clone(),
            document_type: cfg.document_type.clone(),
        })
    }

    /// Point the client at a different query endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `groq` with JSON-encoded `$params` and decode `result`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<T> {
        let mut pairs: Vec<(String, String)> = vec![("query".into(), groq.to_string())];
        for (name, value) in params {
            pairs.push((format!("${name}"), value.to_string()));
        }

        let mut req = self.http.get(&self.base_url).query(&pairs);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SanityError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }
        let parsed: QueryResponse<T> =
            serde_json::from_str(&body).map_err(|source| SanityError::Decode {
                context: "query response".into(),
                source,
            })?;
        Ok(parsed.result)
    }

    fn convert(&self, docs: Vec<SanityDoc>) -> Vec<CaseStudy> {
        docs.into_iter()
            .filter_map(|d| d.into_case_study(&self.project_id, &self.dataset))
            .collect()
    }

    pub async fn case_studies(&self) -> Result<Vec<CaseStudy>> {
        let docs: Vec<SanityDoc> = self.query(&queries::all(&self.document_type), &[]).await?;
        Ok(self.convert(docs))
    }

    pub async fn case_study(&self, slug: &str) -> Result<Option<CaseStudy>> {
        let doc: Option<SanityDoc> = self
            .query(
                &queries::by_slug(&self.document_type),
                &[("slug", serde_json::Value::String(slug.to_string()))],
            )
            .await?;
        Ok(doc.and_then(|d| d.into_case_study(&self.project_id, &self.dataset)))
    }

    pub async fn case_study_page(&self, offset: usize, limit: usize) -> Result<Page> {
        if limit == 0 {
            return Ok(Page::empty());
        }
        let mut docs: Vec<SanityDoc> = self
            .query(&queries::page(&self.document_type, offset, limit), &[])
            .await?;
        // The extra document only signals `has_more`. Documents dropped by
        // `convert` still count towards the window.
        let has_more = docs.len() > limit;
        docs.truncate(limit);
        let consumed = docs.len();
        Ok(Page {
            records: self.convert(docs),
            has_more,
            consumed,
        })
    }

    pub async fn facets(&self) -> Result<AvailableFilters> {
        let raw: Option<RawFacets> = self.query(&queries::facets(&self.document_type), &[]).await?;
        Ok(raw.map(AvailableFilters::from).unwrap_or_default())
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    fn name(&self) -> &'static str {
        "sanity"
    }

    async fn fetch_all(&self) -> folio_core::Result<Vec<CaseStudy>> {
        Ok(self.case_studies().await?)
    }

    async fn fetch_by_slug(&self, slug: &str) -> folio_core::Result<Option<CaseStudy>> {
        Ok(self.case_study(slug).await?)
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> folio_core::Result<Page> {
        Ok(self.case_study_page(offset, limit).await?)
    }

    async fn fetch_available_filters(&self) -> folio_core::Result<AvailableFilters> {
        Ok(self.facets().await?)
    }
}
