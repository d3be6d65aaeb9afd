pub mod api;
pub mod documents;
pub mod og;
pub mod pages;

use crate::error::AppError;
use folio_core::config::MAX_PAGE_SIZE;
use serde::Deserialize;

/// `?offset=&limit=` shared by the JSON API and the card fragments.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PageParams {
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Requested limit, or `default` when absent. Must be `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self, default: usize) -> Result<usize, AppError> {
        let limit = self.limit.unwrap_or(default);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(AppError::bad_request(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        Ok(limit)
    }
}
