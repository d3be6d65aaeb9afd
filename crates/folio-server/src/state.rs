use crate::site::SiteContext;
use anyhow::Context as _;
use folio_core::catalog::Catalog;
use folio_core::config::{Config, SourceKind};
use folio_core::local::LocalSource;
use folio_core::source::ContentSource;
use sanity_client::SanityClient;
use std::path::Path;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub site: Arc<SiteContext>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn ContentSource>) -> anyhow::Result<Self> {
        let site = SiteContext::new(&config).context("failed to compile page templates")?;
        Ok(Self {
            catalog: Catalog::new(source),
            site: Arc::new(site),
        })
    }

    /// Load `folio.yaml` under `root` and connect the configured source.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config = Config::load(root)?;
        let source = open_source(&config, root)?;
        tracing::info!(source = source.name(), "content source ready");
        Self::new(config, source)
    }
}

/// Build the content source named by `config.source.kind`.
pub fn open_source(config: &Config, root: &Path) -> anyhow::Result<Arc<dyn ContentSource>> {
    match config.source.kind {
        SourceKind::Local => Ok(Arc::new(LocalSource::new(config.content_dir(root)))),
        SourceKind::Sanity => {
            let sanity = config
                .source
                .sanity
                .as_ref()
                .context("source.kind is 'sanity' but source.sanity is missing")?;
            Ok(Arc::new(SanityClient::new(sanity)?))
        }
    }
}
