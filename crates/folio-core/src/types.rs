use crate::blocks::ContentBlock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ImageRef
// ---------------------------------------------------------------------------

/// Reference to an image asset held by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Opaque store-side asset identifier.
    pub asset_id: String,
    /// Resolved URL the browser can load, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            url: None,
            width: None,
            height: None,
            alt: None,
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Links and documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

/// Downloadable document (typically a PDF write-up) attached to a case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Overview,
    Problem,
    Approach,
    Solution,
    Result,
}

impl SectionKind {
    pub fn all() -> &'static [SectionKind] {
        &[
            SectionKind::Overview,
            SectionKind::Problem,
            SectionKind::Approach,
            SectionKind::Solution,
            SectionKind::Result,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Overview => "overview",
            SectionKind::Problem => "problem",
            SectionKind::Approach => "approach",
            SectionKind::Solution => "solution",
            SectionKind::Result => "result",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Overview => "Overview",
            SectionKind::Problem => "The problem",
            SectionKind::Approach => "Approach",
            SectionKind::Solution => "Solution",
            SectionKind::Result => "Result",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overview: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problem: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approach: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solution: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<ContentBlock>,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &[ContentBlock] {
        match kind {
            SectionKind::Overview => &self.overview,
            SectionKind::Problem => &self.problem,
            SectionKind::Approach => &self.approach,
            SectionKind::Solution => &self.solution,
            SectionKind::Result => &self.result,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut Vec<ContentBlock> {
        match kind {
            SectionKind::Overview => &mut self.overview,
            SectionKind::Problem => &mut self.problem,
            SectionKind::Approach => &mut self.approach,
            SectionKind::Solution => &mut self.solution,
            SectionKind::Result => &mut self.result,
        }
    }

    /// Non-empty sections in display order.
    pub fn present(&self) -> impl Iterator<Item = (SectionKind, &[ContentBlock])> + '_ {
        SectionKind::all()
            .iter()
            .map(move |&k| (k, self.get(k)))
            .filter(|(_, blocks)| !blocks.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

// ---------------------------------------------------------------------------
// CaseStudy
// ---------------------------------------------------------------------------

/// One portfolio project, as read from the content store.
///
/// Records are read-only snapshots: nothing in folio mutates or deletes them
/// after they are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    #[serde(default)]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Lower values are listed first.
    #[serde(default)]
    pub priority: f64,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub industry: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<ImageRef>,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ExternalLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CaseStudy {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: slug.clone(),
            slug,
            title: title.into(),
            summary: String::new(),
            priority: 0.0,
            tech_stack: Vec::new(),
            industry: Vec::new(),
            thumbnail: None,
            gallery: Vec::new(),
            sections: Sections::default(),
            links: Vec::new(),
            document: None,
            dashboard_url: None,
            updated_at: None,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tech<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_stack = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_industry<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industry = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Summary text, falling back to the first overview paragraph.
    pub fn description(&self) -> String {
        if !self.summary.trim().is_empty() {
            return self.summary.clone();
        }
        self.sections
            .overview
            .iter()
            .map(ContentBlock::plain_text)
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default()
    }

    /// Every image attached to the record: thumbnail first, then gallery.
    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.thumbnail.iter().chain(self.gallery.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_record_defaults_missing_fields() {
        let cs: CaseStudy = serde_yaml::from_str("slug: fleet\ntitle: Fleet").unwrap();
        assert!(cs.tech_stack.is_empty());
        assert!(cs.industry.is_empty());
        assert_eq!(cs.priority, 0.0);
        assert!(cs.sections.is_empty());
    }

    #[test]
    fn description_falls_back_to_overview() {
        let mut cs = CaseStudy::new("fleet", "Fleet");
        cs.sections
            .overview
            .push(ContentBlock::paragraph("Routing for 400 trucks."));
        assert_eq!(cs.description(), "Routing for 400 trucks.");

        cs.summary = "Short summary".into();
        assert_eq!(cs.description(), "Short summary");
    }

    #[test]
    fn present_sections_keep_display_order() {
        let mut sections = Sections::default();
        sections.result.push(ContentBlock::paragraph("r"));
        sections.problem.push(ContentBlock::paragraph("p"));
        let kinds: Vec<_> = sections.present().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![SectionKind::Problem, SectionKind::Result]);
    }

    #[test]
    fn image_dimensions_require_both_sides() {
        let mut img = ImageRef::new("image-abc");
        assert_eq!(img.dimensions(), None);
        img.width = Some(1200);
        assert_eq!(img.dimensions(), None);
        img.height = Some(800);
        assert_eq!(img.dimensions(), Some((1200, 800)));
    }
}
