//! `sanity-client` — read-only access to case studies stored in Sanity.
//!
//! ```text
//! SanitySourceConfig
//!     │
//!     ▼
//! SanityClient   ← GET /v{api}/data/query/{dataset}?query=…&$param=…
//!     │
//!     ▼
//! SanityDoc      ← projected document (queries.rs)
//!     │             portable text → ContentBlock (portable.rs)
//!     ▼             asset refs → CDN URLs (image.rs)
//! CaseStudy
//! ```
//!
//! [`SanityClient`] implements [`folio_core::source::ContentSource`], so it
//! plugs straight into a `Catalog` or `PaginatedLoader`.

pub mod client;
pub mod document;
pub mod error;
pub mod image;
pub mod portable;
pub mod queries;

pub use client::SanityClient;
pub use error::SanityError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, SanityError>;
