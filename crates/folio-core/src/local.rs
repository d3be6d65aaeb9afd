use crate::error::{FolioError, Result};
use crate::filter::AvailableFilters;
use crate::paths;
use crate::source::{sort_by_priority, ContentSource, Page};
use crate::types::CaseStudy;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Content source backed by a directory of YAML files, one case study per
/// file. Used for offline development and for sites that keep content in git.
///
/// The directory is re-read on every call so edits show up without a
/// restart. Records with equal priority keep file-name order.
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn load(&self) -> Result<Vec<CaseStudy>> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || load_dir(&dir))
            .await
            .map_err(|e| FolioError::Source(format!("task join error: {e}")))?
    }
}

/// Read and validate every `*.yaml` file in `dir`, ordered by priority.
pub fn load_dir(dir: &Path) -> Result<Vec<CaseStudy>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension().and_then(|e| e.to_str()) == Some(paths::CASE_STUDY_EXT)
        })
        .collect();
    files.sort();

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let data = std::fs::read_to_string(&path)?;
        let mut record: CaseStudy =
            serde_yaml::from_str(&data).map_err(|source| FolioError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        paths::validate_slug(&record.slug)?;
        if !seen.insert(record.slug.clone()) {
            return Err(FolioError::DuplicateSlug {
                slug: record.slug,
                path: path.display().to_string(),
            });
        }
        if record.id.is_empty() {
            record.id = record.slug.clone();
        }
        records.push(record);
    }

    sort_by_priority(&mut records);
    Ok(records)
}

/// Write `record` to `<dir>/<slug>.yaml`, never overwriting. Returns true if
/// the file was written.
pub fn write_case_study(dir: &Path, record: &CaseStudy) -> Result<bool> {
    paths::validate_slug(&record.slug)?;
    let data = serde_yaml::to_string(record)?;
    crate::io::write_if_missing(&paths::case_study_file(dir, &record.slug), data.as_bytes())
}

#[async_trait]
impl ContentSource for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch_all(&self) -> Result<Vec<CaseStudy>> {
        self.load().await
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        Ok(self.load().await?.into_iter().find(|r| r.slug == slug))
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page> {
        Ok(Page::slice(&self.load().await?, offset, limit))
    }

    async fn fetch_available_filters(&self) -> Result<AvailableFilters> {
        Ok(AvailableFilters::from_records(&self.load().await?))
    }
}
