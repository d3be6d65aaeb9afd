use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

/// Offset bookkeeping for incremental pagination.
///
/// `offset` always equals the number of store positions consumed so far. Once
/// `has_more` turns false it never turns true again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    pub offset: usize,
    pub page_size: usize,
    pub has_more: bool,
}

impl PaginationCursor {
    /// Cursor positioned after an initial batch of `initial_len` records.
    pub fn new(initial_len: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(FolioError::InvalidPageSize(page_size));
        }
        Ok(Self {
            offset: initial_len,
            page_size,
            has_more: true,
        })
    }

    /// Record a successful fetch that covered `fetched` store positions.
    ///
    /// An empty or short page ends pagination regardless of what the source
    /// reported.
    pub fn advance(&mut self, fetched: usize, source_has_more: bool) {
        if !self.has_more {
            return;
        }
        self.offset += fetched;
        self.has_more = source_has_more && fetched >= self.page_size;
    }

    pub fn finish(&mut self) {
        self.has_more = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            PaginationCursor::new(0, 0),
            Err(FolioError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn starts_after_initial_batch() {
        let c = PaginationCursor::new(6, 6).unwrap();
        assert_eq!(c.offset, 6);
        assert!(c.has_more);
    }

    #[test]
    fn full_page_keeps_going() {
        let mut c = PaginationCursor::new(0, 6).unwrap();
        c.advance(6, true);
        assert_eq!(c.offset, 6);
        assert!(c.has_more);
    }

    #[test]
    fn short_page_ends_even_if_source_says_more() {
        let mut c = PaginationCursor::new(0, 6).unwrap();
        c.advance(2, true);
        assert_eq!(c.offset, 2);
        assert!(!c.has_more);
    }

    #[test]
    fn finished_cursor_is_terminal() {
        let mut c = PaginationCursor::new(0, 6).unwrap();
        c.finish();
        c.advance(6, true);
        assert!(!c.has_more);
        assert_eq!(c.offset, 0);
    }
}
