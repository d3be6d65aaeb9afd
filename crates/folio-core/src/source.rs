//! Content source abstraction.
//!
//! A [`ContentSource`] is any store that can hand back case studies ordered
//! by priority. Implementations report failures as errors; turning those into
//! empty results is the job of [`crate::catalog::Catalog`].

use crate::error::Result;
use crate::filter::AvailableFilters;
use crate::types::CaseStudy;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One slice of the priority-ordered record list.
///
/// `consumed` counts the store positions the slice covered. It can exceed
/// `records.len()` when a source drops entries it cannot serve, and is what
/// the next offset must advance by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub records: Vec<CaseStudy>,
    pub has_more: bool,
    #[serde(default)]
    pub consumed: usize,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Offset of the page that follows this one.
    pub fn next_offset(&self, offset: usize) -> usize {
        offset + self.consumed
    }

    /// Cut `[offset, offset + limit)` out of an already ordered list.
    pub fn slice(all: &[CaseStudy], offset: usize, limit: usize) -> Self {
        let start = offset.min(all.len());
        let end = offset.saturating_add(limit).min(all.len());
        Self {
            records: all[start..end].to_vec(),
            has_more: end < all.len(),
            consumed: end - start,
        }
    }
}

/// Sort ascending by priority. The sort is stable, so ties keep the order the
/// store handed them over in.
pub fn sort_by_priority(records: &mut [CaseStudy]) {
    records.sort_by(|a, b| a.priority.total_cmp(&b.priority));
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Every record, ascending by priority.
    async fn fetch_all(&self) -> Result<Vec<CaseStudy>>;

    /// The record with `slug`, if there is one.
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>>;

    /// A gap-free, non-overlapping slice of the same order `fetch_all` uses.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page>;

    /// Sorted distinct tag values for every facet.
    async fn fetch_available_filters(&self) -> Result<AvailableFilters>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<CaseStudy> {
        (0..n)
            .map(|i| CaseStudy::new(format!("cs-{i}"), format!("Case {i}")).with_priority(i as f64))
            .collect()
    }

    #[test]
    fn slice_reports_has_more() {
        let all = records(8);
        let first = Page::slice(&all, 0, 6);
        assert_eq!(first.records.len(), 6);
        assert!(first.has_more);

        let second = Page::slice(&all, 6, 6);
        assert_eq!(second.records.len(), 2);
        assert!(!second.has_more);
        assert_eq!(second.next_offset(6), 8);
    }

    #[test]
    fn slice_past_end_is_empty() {
        let page = Page::slice(&records(3), 10, 6);
        assert!(page.records.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn priority_sort_is_stable() {
        let mut all = vec![
            CaseStudy::new("b", "B").with_priority(2.0),
            CaseStudy::new("a1", "A1").with_priority(1.0),
            CaseStudy::new("a2", "A2").with_priority(1.0),
            CaseStudy::new("z", "Z").with_priority(-1.0),
        ];
        sort_by_priority(&mut all);
        let slugs: Vec<_> = all.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["z", "a1", "a2", "b"]);
    }
}
