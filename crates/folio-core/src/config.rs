use crate::error::{FolioError, Result};
use crate::paths;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Largest page the JSON API and the loader will hand out.
pub const MAX_PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_neutral")]
    pub neutral: String,
}

fn default_accent() -> String {
    "#6366f1".to_string()
}

fn default_neutral() -> String {
    "#0a0a0a".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            accent: default_accent(),
            neutral: default_neutral(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Absolute origin used for canonical and social-preview URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

fn default_title() -> String {
    "Case studies".to_string()
}

// ---------------------------------------------------------------------------
// SourceConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Local,
    Sanity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSourceConfig {
    #[serde(default = "default_local_dir")]
    pub dir: PathBuf,
}

fn default_local_dir() -> PathBuf {
    PathBuf::from(paths::CONTENT_DIR)
}

impl Default for LocalSourceConfig {
    fn default() -> Self {
        Self {
            dir: default_local_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitySourceConfig {
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding a read token, for private
    /// datasets.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_document_type")]
    pub document_type: String,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_use_cdn() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_token_env() -> String {
    "SANITY_API_TOKEN".to_string()
}

fn default_document_type() -> String {
    "caseStudy".to_string()
}

impl SanitySourceConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: default_use_cdn(),
            timeout_secs: default_timeout_secs(),
            token_env: default_token_env(),
            document_type: default_document_type(),
        }
    }

    /// Read token from the configured environment variable, if set.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub local: LocalSourceConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanity: Option<SanitySourceConfig>,
}

// ---------------------------------------------------------------------------
// Listing / landing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Distance from the end of the list, in pixels, at which the browser
    /// asks for the next page.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: u32,
}

fn default_page_size() -> usize {
    6
}

fn default_scroll_threshold() -> u32 {
    400
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold_px: default_scroll_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    #[serde(default = "default_featured")]
    pub featured: usize,
}

fn default_featured() -> usize {
    3
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            featured: default_featured(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub site: SiteConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub landing: LandingConfig,
}

fn default_version() -> u32 {
    1
}

static HEX_COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn hex_color_re() -> &'static Regex {
    HEX_COLOR_RE.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap())
}

impl Config {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            site: SiteConfig {
                name: site_name.into(),
                title: default_title(),
                headline: None,
                intro: None,
                base_url: None,
                theme: Theme::default(),
            },
            source: SourceConfig::default(),
            listing: ListingConfig::default(),
            landing: LandingConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(FolioError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Local content directory, resolved against `root` when relative.
    pub fn content_dir(&self, root: &Path) -> PathBuf {
        if self.source.local.dir.is_absolute() {
            self.source.local.dir.clone()
        } else {
            root.join(&self.source.local.dir)
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut push = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message })
        };

        if self.site.name.trim().is_empty() {
            push(WarnLevel::Error, "site.name must not be empty".to_string());
        }

        match self.source.kind {
            SourceKind::Sanity => match &self.source.sanity {
                None => push(
                    WarnLevel::Error,
                    "source.kind is 'sanity' but source.sanity is missing".to_string(),
                ),
                Some(s) => {
                    if s.project_id.trim().is_empty() {
                        push(
                            WarnLevel::Error,
                            "source.sanity.project_id must not be empty".to_string(),
                        );
                    }
                    if s.dataset.trim().is_empty() {
                        push(
                            WarnLevel::Error,
                            "source.sanity.dataset must not be empty".to_string(),
                        );
                    }
                    if s.timeout_secs == 0 {
                        push(
                            WarnLevel::Warning,
                            "source.sanity.timeout_secs is 0; requests will fail immediately"
                                .to_string(),
                        );
                    }
                }
            },
            SourceKind::Local => {
                let dir = self.content_dir(root);
                if !dir.is_dir() {
                    push(
                        WarnLevel::Warning,
                        format!(
                            "content directory {} does not exist; the site will render empty",
                            dir.display()
                        ),
                    );
                }
            }
        }

        if self.listing.page_size == 0 {
            push(
                WarnLevel::Error,
                "listing.page_size must be greater than zero".to_string(),
            );
        } else if self.listing.page_size > MAX_PAGE_SIZE {
            push(
                WarnLevel::Warning,
                format!(
                    "listing.page_size {} exceeds the maximum of {MAX_PAGE_SIZE}; it will be capped",
                    self.listing.page_size
                ),
            );
        }

        for (field, value) in [
            ("site.theme.accent", &self.site.theme.accent),
            ("site.theme.neutral", &self.site.theme.neutral),
        ] {
            if !hex_color_re().is_match(value) {
                push(
                    WarnLevel::Warning,
                    format!("{field} '{value}' is not a hex colour; the default will be used"),
                );
            }
        }

        if let Some(url) = &self.site.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                push(
                    WarnLevel::Warning,
                    format!("site.base_url '{url}' should start with http:// or https://"),
                );
            }
        }

        warnings
    }

    /// Page size clamped to what the API will serve.
    pub fn page_size(&self) -> usize {
        self.listing.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// True if `value` is a `#rgb` or `#rrggbb` colour.
pub fn is_hex_color(value: &str) -> bool {
    hex_color_re().is_match(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("Jane Doe");
        cfg.site.headline = Some("Design engineer".into());
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.site.name, "Jane Doe");
        assert_eq!(loaded.site.headline.as_deref(), Some("Design engineer"));
        assert_eq!(loaded.listing.page_size, 6);
        assert_eq!(loaded.source.kind, SourceKind::Local);
    }

    #[test]
    fn load_without_file_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(FolioError::NotInitialized)
        ));
    }

    #[test]
    fn minimal_yaml_gets_defaults() {
        let cfg: Config = serde_yaml::from_str(
            "site:\n  name: Jane\nsource:\n  kind: sanity\n  sanity:\n    project_id: abc123\n",
        )
        .unwrap();
        let sanity = cfg.source.sanity.unwrap();
        assert_eq!(sanity.dataset, "production");
        assert!(sanity.use_cdn);
        assert_eq!(sanity.document_type, "caseStudy");
        assert_eq!(cfg.site.theme.mode, ThemeMode::Dark);
        assert_eq!(cfg.landing.featured, 3);
    }

    #[test]
    fn validate_flags_missing_sanity_block() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("Jane");
        cfg.source.kind = SourceKind::Sanity;
        let warnings = cfg.validate(dir.path());
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("source.sanity")));
    }

    #[test]
    fn validate_flags_zero_page_size_and_bad_colour() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::CONTENT_DIR)).unwrap();
        let mut cfg = Config::new("Jane");
        cfg.listing.page_size = 0;
        cfg.site.theme.accent = "purple".into();
        let warnings = cfg.validate(dir.path());
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("page_size")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("accent")));
    }

    #[test]
    fn valid_local_config_has_no_warnings() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::CONTENT_DIR)).unwrap();
        assert!(Config::new("Jane").validate(dir.path()).is_empty());
    }

    #[test]
    fn page_size_is_capped() {
        let mut cfg = Config::new("Jane");
        cfg.listing.page_size = 500;
        assert_eq!(cfg.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn hex_colours() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#6366f1"));
        assert!(!is_hex_color("6366f1"));
        assert!(!is_hex_color("#12345"));
    }
}
