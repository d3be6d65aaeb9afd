use crate::types::CaseStudy;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Facet
// ---------------------------------------------------------------------------

/// An independent filter dimension over case studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    TechStack,
    Industry,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[Facet::TechStack, Facet::Industry]
    }

    /// Query-string parameter that carries this facet.
    pub fn param(self) -> &'static str {
        match self {
            Facet::TechStack => "techStack",
            Facet::Industry => "industry",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::TechStack => "Technology",
            Facet::Industry => "Industry",
        }
    }

    /// Tag values a record carries for this facet.
    pub fn tags(self, record: &CaseStudy) -> &[String] {
        match self {
            Facet::TechStack => &record.tech_stack,
            Facet::Industry => &record.industry,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl std::str::FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "techStack" | "tech_stack" | "tech" => Ok(Facet::TechStack),
            "industry" => Ok(Facet::Industry),
            other => Err(format!("unknown facet: {other}")),
        }
    }
}

/// Split a raw facet value into normalised tags.
///
/// Commas separate values in the query string, so a comma inside a value
/// always yields two tags. Surrounding whitespace is trimmed and empty
/// pieces are dropped.
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The selected values for every facet. An empty facet means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    tech_stack: BTreeSet<String>,
    #[serde(default)]
    industry: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: add every value in `values` to `facet`.
    pub fn with<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for v in values {
            self.insert(facet, v.as_ref());
        }
        self
    }

    pub fn values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::TechStack => &self.tech_stack,
            Facet::Industry => &self.industry,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::TechStack => &mut self.tech_stack,
            Facet::Industry => &mut self.industry,
        }
    }

    /// Add a value. Returns true if the state changed.
    pub fn insert(&mut self, facet: Facet, raw: &str) -> bool {
        let set = self.values_mut(facet);
        let mut changed = false;
        for tag in split_tags(raw) {
            changed |= set.insert(tag.to_string());
        }
        changed
    }

    /// Remove a value. Returns true if it was present.
    pub fn remove(&mut self, facet: Facet, value: &str) -> bool {
        self.values_mut(facet).remove(value.trim())
    }

    /// Add the value if absent, remove it if present.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        if !self.remove(facet, value) {
            self.insert(facet, value);
        }
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).contains(value)
    }

    pub fn clear(&mut self) {
        self.tech_stack.clear();
        self.industry.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tech_stack.is_empty() && self.industry.is_empty()
    }

    /// Number of selected values across all facets. Display only.
    pub fn active_count(&self) -> usize {
        self.tech_stack.len() + self.industry.len()
    }

    /// Selected `(facet, value)` pairs in facet order, then value order.
    pub fn active(&self) -> impl Iterator<Item = (Facet, &str)> + '_ {
        Facet::all()
            .iter()
            .flat_map(move |&f| self.values(f).iter().map(move |v| (f, v.as_str())))
    }

    /// OR within a facet, AND across facets. A facet with no selection
    /// places no constraint on the record.
    pub fn matches(&self, record: &CaseStudy) -> bool {
        Facet::all().iter().all(|&facet| {
            let wanted = self.values(facet);
            wanted.is_empty() || facet.tags(record).iter().any(|t| wanted.contains(t))
        })
    }
}

/// Visible subset of `records` under `filters`, preserving input order.
///
/// With no active filter the input is returned borrowed and unchanged.
pub fn apply<'a>(records: &'a [CaseStudy], filters: &FilterState) -> Cow<'a, [CaseStudy]> {
    if filters.is_empty() {
        return Cow::Borrowed(records);
    }
    Cow::Owned(
        records
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// AvailableFilters
// ---------------------------------------------------------------------------

/// Every distinct tag value across the catalog, sorted, per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableFilters {
    #[serde(default)]
    pub tech_stack: BTreeSet<String>,
    #[serde(default)]
    pub industry: BTreeSet<String>,
}

impl AvailableFilters {
    pub fn from_records(records: &[CaseStudy]) -> Self {
        let mut out = Self::default();
        for r in records {
            for &facet in Facet::all() {
                out.values_mut(facet).extend(
                    facet
                        .tags(r)
                        .iter()
                        .map(|t| t.trim())
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                );
            }
        }
        out
    }

    pub fn values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::TechStack => &self.tech_stack,
            Facet::Industry => &self.industry,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::TechStack => &mut self.tech_stack,
            Facet::Industry => &mut self.industry,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tech_stack.is_empty() && self.industry.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
