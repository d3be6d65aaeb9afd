//! Incremental "load more" pagination over a [`ContentSource`].
//!
//! ```text
//! Idle(has_more) ──load_more──▶ Loading ──ok/err──▶ Idle(has_more')
//!                                  │
//!                          load_more again
//!                                  ▼
//!                      stale request cancelled, its
//!                      result discarded
//! ```
//!
//! `Idle(has_more = false)` is terminal: further calls return `false`
//! without touching the source.

use crate::cursor::PaginationCursor;
use crate::error::Result;
use crate::source::{ContentSource, Page};
use crate::types::CaseStudy;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSnapshot {
    pub loaded: usize,
    pub cursor: PaginationCursor,
    pub loading: bool,
    pub closed: bool,
}

struct LoaderState {
    records: Vec<CaseStudy>,
    cursor: PaginationCursor,
    loading: bool,
    generation: u64,
    in_flight: Option<CancellationToken>,
    closed: bool,
}

/// Accumulates records page by page. At most one fetch is live at a time:
/// a new [`load_more`](Self::load_more) cancels the outstanding one.
///
/// Clones share state, so one clone can supersede or close a request
/// started through another.
#[derive(Clone)]
pub struct PaginatedLoader {
    source: Arc<dyn ContentSource>,
    state: Arc<Mutex<LoaderState>>,
}

impl PaginatedLoader {
    /// Loader with nothing loaded yet.
    pub fn new(source: Arc<dyn ContentSource>, page_size: usize) -> Result<Self> {
        Self::with_initial(source, Vec::new(), page_size)
    }

    /// Loader continuing after an initial batch that was fetched elsewhere.
    pub fn with_initial(
        source: Arc<dyn ContentSource>,
        initial: Vec<CaseStudy>,
        page_size: usize,
    ) -> Result<Self> {
        let cursor = PaginationCursor::new(initial.len(), page_size)?;
        Ok(Self {
            source,
            state: Arc::new(Mutex::new(LoaderState {
                records: initial,
                cursor,
                loading: false,
                generation: 0,
                in_flight: None,
                closed: false,
            })),
        })
    }

    /// Fetch the next page and append it. Returns whether more pages remain.
    ///
    /// A call superseded by a later one leaves no trace in the loader state.
    pub async fn load_more(&self) -> bool {
        let (generation, token, offset, limit) = {
            let mut st = self.state.lock().await;
            if st.closed || !st.cursor.has_more {
                return false;
            }
            if let Some(stale) = st.in_flight.take() {
                tracing::debug!(offset = st.cursor.offset, "superseding in-flight page request");
                stale.cancel();
            }
            st.generation += 1;
            st.loading = true;
            let token = CancellationToken::new();
            st.in_flight = Some(token.clone());
            (st.generation, token, st.cursor.offset, st.cursor.page_size)
        };

        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            res = self.source.fetch_page(offset, limit) => Some(res),
        };

        let mut st = self.state.lock().await;
        let current = !st.closed && st.generation == generation;
        let Some(res) = outcome.filter(|_| current) else {
            return !st.closed && st.cursor.has_more;
        };

        st.in_flight = None;
        st.loading = false;
        match res {
            Ok(Page {
                records,
                has_more,
                consumed,
            }) => {
                if consumed == 0 {
                    st.cursor.finish();
                } else {
                    st.records.extend(records);
                    st.cursor.advance(consumed, has_more);
                }
            }
            Err(e) => {
                tracing::error!(source = self.source.name(), offset, error = %e, "page fetch failed; stopping pagination");
                st.cursor.finish();
            }
        }
        st.cursor.has_more
    }

    /// Tear the loader down: cancel any in-flight request and ignore every
    /// completion from here on.
    pub async fn close(&self) {
        let mut st = self.state.lock().await;
        st.closed = true;
        st.loading = false;
        if let Some(token) = st.in_flight.take() {
            token.cancel();
        }
    }

    pub async fn records(&self) -> Vec<CaseStudy> {
        self.state.lock().await.records.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.lock().await.cursor.has_more
    }

    pub async fn snapshot(&self) -> LoaderSnapshot {
        let st = self.state.lock().await;
        LoaderSnapshot {
            loaded: st.records.len(),
            cursor: st.cursor,
            loading: st.loading,
            closed: st.closed,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
