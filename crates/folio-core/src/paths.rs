use crate::error::{FolioError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "folio.yaml";
pub const CONTENT_DIR: &str = "content/case-studies";
pub const CASE_STUDY_EXT: &str = "yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn content_dir(root: &Path) -> PathBuf {
    root.join(CONTENT_DIR)
}

pub fn case_study_file(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{slug}.{CASE_STUDY_EXT}"))
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 96 || !slug_re().is_match(slug) {
        return Err(FolioError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["fleet-dashboard", "a", "retail-analytics-2023", "x1"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-starts-with-dash",
            "ends-with-dash-",
            "has spaces",
            "UPPER",
            "a_b",
            "../escape",
        ] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/site");
        assert_eq!(config_path(root), PathBuf::from("/tmp/site/folio.yaml"));
        assert_eq!(
            case_study_file(&content_dir(root), "fleet"),
            PathBuf::from("/tmp/site/content/case-studies/fleet.yaml")
        );
    }
}
