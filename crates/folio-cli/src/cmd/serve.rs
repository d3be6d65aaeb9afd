use anyhow::Context;
use folio_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, port: u16, no_open: bool) -> anyhow::Result<()> {
    // Fail before binding when there is no site here.
    Config::load(root).with_context(|| format!("cannot serve {}", root.display()))?;
    let rt = super::runtime()?;
    rt.block_on(folio_server::serve(root, port, !no_open))
}
