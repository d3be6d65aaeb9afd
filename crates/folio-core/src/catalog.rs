use crate::filter::AvailableFilters;
use crate::source::{ContentSource, Page};
use crate::types::CaseStudy;
use std::sync::Arc;

/// Fail-open front for a [`ContentSource`].
///
/// Every fetch error is logged and replaced with the empty value for that
/// call, so callers only ever see data or its absence.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn ContentSource>,
}

impl Catalog {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }

    pub async fn fetch_all(&self) -> Vec<CaseStudy> {
        match self.source.fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(source = self.source.name(), error = %e, "fetch_all failed; serving empty list");
                Vec::new()
            }
        }
    }

    pub async fn fetch_by_slug(&self, slug: &str) -> Option<CaseStudy> {
        match self.source.fetch_by_slug(slug).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(source = self.source.name(), slug, error = %e, "fetch_by_slug failed; treating as absent");
                None
            }
        }
    }

    pub async fn fetch_page(&self, offset: usize, limit: usize) -> Page {
        match self.source.fetch_page(offset, limit).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(source = self.source.name(), offset, limit, error = %e, "fetch_page failed; serving empty page");
                Page::empty()
            }
        }
    }

    pub async fn fetch_available_filters(&self) -> AvailableFilters {
        match self.source.fetch_available_filters().await {
            Ok(filters) => filters,
            Err(e) => {
                tracing::warn!(source = self.source.name(), error = %e, "fetch_available_filters failed; serving no filters");
                AvailableFilters::default()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{FolioError, Result};
    use async_trait::async_trait;

    /// Source whose every call fails.
    pub(crate) struct BrokenSource;

    #[async_trait]
    impl ContentSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch_all(&self) -> Result<Vec<CaseStudy>> {
            Err(FolioError::Source("connection refused".into()))
        }

        async fn fetch_by_slug(&self, _slug: &str) -> Result<Option<CaseStudy>> {
            Err(FolioError::Source("connection refused".into()))
        }

        async fn fetch_page(&self, _offset: usize, _limit: usize) -> Result<Page> {
            Err(FolioError::Source("connection refused".into()))
        }

        async fn fetch_available_filters(&self) -> Result<AvailableFilters> {
            Err(FolioError::Source("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn failures_become_empty_results() {
        let catalog = Catalog::new(Arc::new(BrokenSource));
        assert!(catalog.fetch_all().await.is_empty());
        assert!(catalog.fetch_by_slug("anything").await.is_none());
        assert_eq!(catalog.fetch_page(0, 6).await, Page::empty());
        assert!(catalog.fetch_available_filters().await.is_empty());
    }

    #[tokio::test]
    async fn successful_calls_pass_through() {
        let source = crate::memory::MemorySource::new(vec![
            CaseStudy::new("fleet", "Fleet").with_tech(["Rust"]),
        ]);
        let catalog = Catalog::new(Arc::new(source));
        assert_eq!(catalog.fetch_all().await.len(), 1);
        assert_eq!(
            catalog.fetch_by_slug("fleet").await.map(|r| r.title),
            Some("Fleet".to_string())
        );
        assert!(catalog
            .fetch_available_filters()
            .await
            .tech_stack
            .contains("Rust"));
    }
}
