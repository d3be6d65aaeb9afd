//! Filter state kept in sync with a page URL.
//!
//! The URL query string is the only shareable representation of the current
//! filters: `techStack` and `industry` each carry a comma-joined list, and a
//! facet with nothing selected is left out of the URL entirely.

use crate::filter::{Facet, FilterState};
use url::form_urlencoded;

// ---------------------------------------------------------------------------
// Query string codec
// ---------------------------------------------------------------------------

/// Read the filter state out of a raw query string (without the leading `?`).
///
/// A missing parameter means no constraint for that facet. Repeated
/// parameters are merged.
pub fn parse_query(query: &str) -> FilterState {
    let query = query.trim_start_matches('?');
    let mut state = FilterState::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if let Some(&facet) = Facet::all().iter().find(|f| f.param() == key) {
            state.insert(facet, &value);
        }
    }
    state
}

/// Rewrite `query` so that it carries `state`.
///
/// Parameters that are not facets are kept in their original order; facet
/// parameters are dropped and re-appended for every non-empty facet.
pub fn write_query(query: &str, state: &FilterState) -> String {
    let query = query.trim_start_matches('?');
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if Facet::all().iter().any(|f| f.param() == key) {
            continue;
        }
        out.append_pair(&key, &value);
    }
    for &facet in Facet::all() {
        let values = state.values(facet);
        if values.is_empty() {
            continue;
        }
        let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        out.append_pair(facet.param(), &joined);
    }
    out.finish()
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// The piece of a page URL that filter state lives in.
///
/// `replace_query` has replace semantics: it swaps the current entry's query
/// without adding a history entry and without reloading anything.
pub trait Location {
    fn query(&self) -> String;
    fn replace_query(&mut self, query: &str);
}

/// A path plus query string, as seen by a request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    path: String,
    query: String,
}

impl PageLocation {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: query.unwrap_or_default().trim_start_matches('?').to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path and query suitable for an `href`.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl Location for PageLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.trim_start_matches('?').to_string();
    }
}

// ---------------------------------------------------------------------------
// FilterStore
// ---------------------------------------------------------------------------

/// Holds the current [`FilterState`] and mirrors every change into a
/// [`Location`].
#[derive(Debug, Clone)]
pub struct FilterStore<L: Location> {
    location: L,
    state: FilterState,
}

impl<L: Location> FilterStore<L> {
    /// Initialise from whatever the location currently carries.
    pub fn new(location: L) -> Self {
        let state = parse_query(&location.query());
        Self { location, state }
    }

    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    /// Replace the whole state and write it to the location.
    pub fn set_filters(&mut self, next: FilterState) {
        let query = write_query(&self.location.query(), &next);
        self.location.replace_query(&query);
        self.state = next;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterState::new());
    }

    pub fn remove_filter(&mut self, facet: Facet, value: &str) {
        let mut next = self.state.clone();
        next.remove(facet, value);
        self.set_filters(next);
    }

    pub fn toggle_filter(&mut self, facet: Facet, value: &str) {
        let mut next = self.state.clone();
        next.toggle(facet, value);
        self.set_filters(next);
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.active_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
