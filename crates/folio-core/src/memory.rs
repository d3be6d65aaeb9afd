use crate::error::Result;
use crate::filter::AvailableFilters;
use crate::source::{sort_by_priority, ContentSource, Page};
use crate::types::CaseStudy;
use async_trait::async_trait;

/// Content source over a fixed list of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<CaseStudy>,
}

impl MemorySource {
    pub fn new(mut records: Vec<CaseStudy>) -> Self {
        sort_by_priority(&mut records);
        Self { records }
    }

    pub fn records(&self) -> &[CaseStudy] {
        &self.records
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<CaseStudy>> {
        Ok(self.records.clone())
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        Ok(self.records.iter().find(|r| r.slug == slug).cloned())
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page> {
        Ok(Page::slice(&self.records, offset, limit))
    }

    async fn fetch_available_filters(&self) -> Result<AvailableFilters> {
        Ok(AvailableFilters::from_records(&self.records))
    }
}
