use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("not initialized: run 'folio init'")]
    NotInitialized,

    #[error("case study not found: {0}")]
    CaseStudyNotFound(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("duplicate slug '{slug}' in {path}")]
    DuplicateSlug { slug: String, path: String },

    #[error("invalid page size {0}: must be greater than zero")]
    InvalidPageSize(usize),

    #[error("content source error: {0}")]
    Source(String),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
