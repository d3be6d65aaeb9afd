use thiserror::Error;

#[derive(Debug, Error)]
pub enum SanityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sanity returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid Sanity configuration: {0}")]
    Config(String),
}

impl From<SanityError> for folio_core::FolioError {
    fn from(err: SanityError) -> Self {
        folio_core::FolioError::Source(err.to_string())
    }
}
