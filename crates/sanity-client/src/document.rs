use crate::image::RawImage;
use crate::portable;
use chrono::{DateTime, Utc};
use folio_core::filter::AvailableFilters;
use folio_core::types::{CaseStudy, DocumentRef, ExternalLink, SectionKind};
use serde::Deserialize;
use serde_json::Value;

/// A case-study document as projected by the queries in [`crate::queries`].
///
/// GROQ yields `null` for absent fields, so everything but the id is
/// optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub industry: Option<Vec<String>>,
    #[serde(default)]
    pub thumbnail: Option<RawImage>,
    #[serde(default)]
    pub gallery: Option<Vec<RawImage>>,
    #[serde(default)]
    pub overview: Option<Vec<Value>>,
    #[serde(default)]
    pub problem: Option<Vec<Value>>,
    #[serde(default)]
    pub approach: Option<Vec<Value>>,
    #[serde(default)]
    pub solution: Option<Vec<Value>>,
    #[serde(default)]
    pub result: Option<Vec<Value>>,
    #[serde(default)]
    pub links: Option<Vec<RawLink>>,
    #[serde(default)]
    pub document: Option<RawDocument>,
    #[serde(default)]
    pub dashboard_url: Option<String>,
    #[serde(default, rename = "_updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
}

fn clean_tags(tags: Option<Vec<String>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl SanityDoc {
    /// Convert to a [`CaseStudy`]. Documents without a valid slug cannot be
    /// addressed and yield `None`.
    pub fn into_case_study(self, project_id: &str, dataset: &str) -> Option<CaseStudy> {
        let Some(slug) = non_empty(self.slug) else {
            tracing::debug!(id = %self.id, "skipping document without a slug");
            return None;
        };
        if folio_core::paths::validate_slug(&slug).is_err() {
            tracing::warn!(id = %self.id, slug = %slug, "skipping document with an invalid slug");
            return None;
        }
        let title = non_empty(self.title).unwrap_or_else(|| slug.clone());
        let mut record = CaseStudy::new(slug, title);
        record.id = self.id;
        record.summary = self.summary.unwrap_or_default();
        record.priority = self.priority.unwrap_or_default();
        record.tech_stack = clean_tags(self.tech_stack);
        record.industry = clean_tags(self.industry);
        record.thumbnail = self
            .thumbnail
            .and_then(|img| img.resolve(project_id, dataset));
        record.gallery = self
            .gallery
            .unwrap_or_default()
            .iter()
            .filter_map(|img| img.resolve(project_id, dataset))
            .collect();

        for (kind, blocks) in [
            (SectionKind::Overview, self.overview),
            (SectionKind::Problem, self.problem),
            (SectionKind::Approach, self.approach),
            (SectionKind::Solution, self.solution),
            (SectionKind::Result, self.result),
        ] {
            if let Some(blocks) = blocks {
                *record.sections.get_mut(kind) = portable::decode(&blocks, project_id, dataset);
            }
        }

        record.links = self
            .links
            .unwrap_or_default()
            .into_iter()
            .filter_map(|l| {
                let url = non_empty(l.url)?;
                let label = non_empty(l.label).unwrap_or_else(|| url.clone());
                Some(ExternalLink { label, url })
            })
            .collect();
        record.document = self.document.and_then(|d| {
            Some(DocumentRef {
                url: non_empty(d.url)?,
                filename: non_empty(d.original_filename),
            })
        });
        record.dashboard_url = non_empty(self.dashboard_url);
        record.updated_at = self.updated_at;
        Some(record)
    }
}

/// Result of the facet query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFacets {
    #[serde(default)]
    pub tech_stack: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub industry: Option<Vec<Option<String>>>,
}

impl From<RawFacets> for AvailableFilters {
    fn from(raw: RawFacets) -> Self {
        let collect = |values: Option<Vec<Option<String>>>| {
            values
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        };
        AvailableFilters {
            tech_stack: collect(raw.tech_stack),
            industry: collect(raw.industry),
        }
    }
}
