pub mod config;
pub mod filters;
pub mod init;
pub mod list;
pub mod serve;
pub mod show;

use anyhow::Context;
use folio_core::config::Config;
use folio_core::source::ContentSource;
use std::path::Path;
use std::sync::Arc;

/// Load `folio.yaml` and connect the configured content source.
pub(crate) fn open(root: &Path) -> anyhow::Result<(Config, Arc<dyn ContentSource>)> {
    let config = Config::load(root)
        .with_context(|| format!("failed to load site at {}", root.display()))?;
    let source = folio_server::state::open_source(&config, root)?;
    Ok((config, source))
}

pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start async runtime")
}
