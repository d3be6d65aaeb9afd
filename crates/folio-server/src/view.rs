//! Template view models.

use crate::render::blocks::{image_tag, is_safe_href, render_blocks};
use folio_core::filter::{AvailableFilters, Facet};
use folio_core::location::{FilterStore, PageLocation};
use folio_core::types::CaseStudy;
use serde::Serialize;

const SUMMARY_CHARS: usize = 180;

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub summary: String,
    pub thumbnail: Option<String>,
    pub tech_stack: Vec<String>,
    pub industry: Vec<String>,
}

impl From<&CaseStudy> for CardView {
    fn from(r: &CaseStudy) -> Self {
        Self {
            slug: r.slug.clone(),
            href: format!("/work/{}", r.slug),
            title: r.title.clone(),
            summary: truncate(&r.description(), SUMMARY_CHARS),
            thumbnail: r
                .thumbnail
                .as_ref()
                .and_then(|img| image_tag(img, "card-img")),
            tech_stack: r.tech_stack.clone(),
            industry: r.industry.clone(),
        }
    }
}

pub fn cards(records: &[CaseStudy]) -> Vec<CardView> {
    records.iter().map(CardView::from).collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    match cut.rfind(' ') {
        Some(i) => format!("{}…", cut[..i].trim_end()),
        None => format!("{cut}…"),
    }
}

// ---------------------------------------------------------------------------
// Filter controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PillView {
    pub value: String,
    pub active: bool,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetView {
    pub param: &'static str,
    pub label: &'static str,
    pub options: Vec<PillView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChipView {
    pub label: &'static str,
    pub value: String,
    pub href: String,
}

/// Pill groups for every facet with at least one value. Each pill links to
/// the page with that value toggled.
pub fn facets(store: &FilterStore<PageLocation>, available: &AvailableFilters) -> Vec<FacetView> {
    Facet::all()
        .iter()
        .filter(|&&facet| !available.values(facet).is_empty())
        .map(|&facet| FacetView {
            param: facet.param(),
            label: facet.label(),
            options: available
                .values(facet)
                .iter()
                .map(|value| {
                    let mut next = store.clone();
                    next.toggle_filter(facet, value);
                    PillView {
                        value: value.clone(),
                        active: store.filters().contains(facet, value),
                        href: next.location().href(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// One removable chip per active value.
pub fn chips(store: &FilterStore<PageLocation>) -> Vec<ChipView> {
    store
        .filters()
        .active()
        .map(|(facet, value)| {
            let mut next = store.clone();
            next.remove_filter(facet, value);
            ChipView {
                label: facet.label(),
                value: value.to_string(),
                href: next.location().href(),
            }
        })
        .collect()
}

pub fn clear_href(store: &FilterStore<PageLocation>) -> String {
    let mut next = store.clone();
    next.clear_filters();
    next.location().href()
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub id: &'static str,
    pub title: &'static str,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub title: String,
    pub summary: String,
    pub tech_stack: Vec<String>,
    pub industry: Vec<String>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub record: DetailView,
    pub description: String,
    pub sections: Vec<SectionView>,
    pub gallery: Vec<String>,
    pub dashboard_url: String,
    pub document_href: String,
    pub updated: String,
}

impl From<&CaseStudy> for DetailPage {
    fn from(r: &CaseStudy) -> Self {
        Self {
            record: DetailView {
                title: r.title.clone(),
                summary: r.summary.clone(),
                tech_stack: r.tech_stack.clone(),
                industry: r.industry.clone(),
                links: r
                    .links
                    .iter()
                    .filter(|l| is_safe_href(&l.url))
                    .map(|l| LinkView {
                        label: l.label.clone(),
                        url: l.url.clone(),
                    })
                    .collect(),
            },
            description: r.description(),
            sections: r
                .sections
                .present()
                .map(|(kind, blocks)| SectionView {
                    id: kind.as_str(),
                    title: kind.title(),
                    html: render_blocks(blocks),
                })
                .collect(),
            gallery: r
                .gallery
                .iter()
                .filter_map(|img| image_tag(img, "carousel-img"))
                .collect(),
            dashboard_url: r
                .dashboard_url
                .clone()
                .filter(|u| u.starts_with("https://"))
                .unwrap_or_default(),
            document_href: r
                .document
                .as_ref()
                .map(|_| format!("/documents/{}", r.slug))
                .unwrap_or_default(),
            updated: r
                .updated_at
                .map(|t| t.format("%B %-d, %Y").to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::{DocumentRef, ExternalLink};

    fn store(query: &str) -> FilterStore<PageLocation> {
        FilterStore::new(PageLocation::new("/work", Some(query)))
    }

    #[test]
    fn pills_toggle_and_mark_active() {
        let records = vec![
            CaseStudy::new("a", "A").with_tech(["React"]),
            CaseStudy::new("b", "B").with_tech(["Vue"]),
        ];
        let available = AvailableFilters::from_records(&records);
        let views = facets(&store("techStack=React"), &available);
        assert_eq!(views.len(), 1, "industry has no values");
        let react = &views[0].options[0];
        assert_eq!(react.value, "React");
        assert!(react.active);
        assert_eq!(react.href, "/work");
        let vue = &views[0].options[1];
        assert!(!vue.active);
        assert_eq!(vue.href, "/work?techStack=React%2CVue");
    }

    #[test]
    fn chips_remove_one_value_each() {
        let s = store("techStack=React&industry=Fintech&page=2");
        let chips = chips(&s);
        assert_eq!(chips.len(), 2);
        assert!(chips.iter().all(|c| c.href.contains("page=2")));
        assert_eq!(clear_href(&s), "/work?page=2");
    }

    #[test]
    fn long_summaries_are_cut_on_a_word() {
        let mut r = CaseStudy::new("a", "A");
        r.summary = "word ".repeat(60);
        let card = CardView::from(&r);
        assert!(card.summary.ends_with("word…"));
        assert!(card.summary.chars().count() <= SUMMARY_CHARS + 1);
    }

    #[test]
    fn detail_page_filters_unsafe_links() {
        let mut r = CaseStudy::new("fleet", "Fleet");
        r.links = vec![
            ExternalLink {
                label: "Site".into(),
                url: "https://fleet.example".into(),
            },
            ExternalLink {
                label: "Bad".into(),
                url: "javascript:alert(1)".into(),
            },
        ];
        r.document = Some(DocumentRef {
            url: "https://cdn.example/fleet.pdf".into(),
            filename: None,
        });
        let page = DetailPage::from(&r);
        assert_eq!(page.record.links.len(), 1);
        assert_eq!(page.document_href, "/documents/fleet");
        assert!(page.sections.is_empty());
    }
}
