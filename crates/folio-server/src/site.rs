//! Site-wide presentation context: theme, icon set and compiled templates.
//!
//! Built once from [`Config`] at startup and shared through [`AppState`].
//!
//! [`AppState`]: crate::state::AppState

use crate::templates;
use folio_core::config::{is_hex_color, Config, Theme, ThemeMode};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Resolved theme colours. Invalid configured colours fall back to defaults.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeVars {
    pub mode: &'static str,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    /// `:root` custom properties for the stylesheet.
    pub css: String,
}

impl From<&Theme> for ThemeVars {
    fn from(theme: &Theme) -> Self {
        let defaults = Theme::default();
        let pick = |value: &str, fallback: &str| {
            if is_hex_color(value) {
                value.to_string()
            } else {
                fallback.to_string()
            }
        };
        let accent = pick(&theme.accent, &defaults.accent);
        let neutral = pick(&theme.neutral, &defaults.neutral);
        let (background, foreground) = match theme.mode {
            ThemeMode::Dark => (neutral, "#fafafa".to_string()),
            ThemeMode::Light => ("#ffffff".to_string(), neutral),
        };
        let css = format!("--bg: {background}; --fg: {foreground}; --accent: {accent};");
        Self {
            mode: theme.mode.as_str(),
            accent,
            background,
            foreground,
            css,
        }
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ArrowLeft,
    ArrowRight,
    ExternalLink,
    Download,
    Filter,
    Close,
    Chart,
}

impl Icon {
    pub fn all() -> &'static [Icon] {
        &[
            Icon::ArrowLeft,
            Icon::ArrowRight,
            Icon::ExternalLink,
            Icon::Download,
            Icon::Filter,
            Icon::Close,
            Icon::Chart,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::ArrowLeft => "arrow_left",
            Icon::ArrowRight => "arrow_right",
            Icon::ExternalLink => "external_link",
            Icon::Download => "download",
            Icon::Filter => "filter",
            Icon::Close => "close",
            Icon::Chart => "chart",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Icon::ArrowLeft => "M15 18l-6-6 6-6",
            Icon::ArrowRight => "M9 18l6-6-6-6",
            Icon::ExternalLink => "M14 4h6v6M20 4l-9 9M18 14v5a1 1 0 01-1 1H5a1 1 0 01-1-1V7a1 1 0 011-1h5",
            Icon::Download => "M12 4v11M7 10l5 5 5-5M5 20h14",
            Icon::Filter => "M4 5h16l-6 8v6l-4-2v-4z",
            Icon::Close => "M6 6l12 12M18 6L6 18",
            Icon::Chart => "M4 20V10M10 20V4M16 20v-7M22 20H2",
        }
    }

    pub fn svg(self) -> String {
        format!(
            r#"<svg class="icon icon-{}" viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="1.75" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="{}"/></svg>"#,
            self.name(),
            self.path()
        )
    }
}

// ---------------------------------------------------------------------------
// SiteContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct SiteView {
    name: String,
    title: String,
    headline: String,
    intro: String,
    description: String,
    base_url: Option<String>,
    theme: ThemeVars,
    scroll_threshold_px: u32,
}

pub struct SiteContext {
    view: SiteView,
    icons: BTreeMap<&'static str, String>,
    templates: Tera,
    pub page_size: usize,
    pub featured: usize,
}

impl SiteContext {
    pub fn new(config: &Config) -> Result<Self, tera::Error> {
        let site = &config.site;
        Ok(Self {
            view: SiteView {
                name: site.name.clone(),
                title: site.title.clone(),
                headline: site.headline.clone().unwrap_or_else(|| site.name.clone()),
                intro: site.intro.clone().unwrap_or_default(),
                description: site
                    .intro
                    .clone()
                    .unwrap_or_else(|| format!("{} by {}", site.title, site.name)),
                base_url: site
                    .base_url
                    .as_ref()
                    .map(|u| u.trim_end_matches('/').to_string()),
                theme: ThemeVars::from(&site.theme),
                scroll_threshold_px: config.listing.scroll_threshold_px,
            },
            icons: Icon::all().iter().map(|i| (i.name(), i.svg())).collect(),
            templates: templates::build()?,
            page_size: config.page_size(),
            featured: config.landing.featured,
        })
    }

    pub fn name(&self) -> &str {
        &self.view.name
    }

    pub fn title(&self) -> &str {
        &self.view.title
    }

    pub fn headline(&self) -> &str {
        &self.view.headline
    }

    pub fn intro(&self) -> &str {
        &self.view.intro
    }

    pub fn theme(&self) -> &ThemeVars {
        &self.view.theme
    }

    /// Absolute URL for `path` when a base URL is configured.
    pub fn absolute_url(&self, path: &str) -> String {
        match &self.view.base_url {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }

    /// Template context pre-filled with `site`, `icons` and the site-wide
    /// preview image.
    pub fn context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &self.view);
        ctx.insert("icons", &self.icons);
        ctx.insert("og_image", &self.absolute_url("/og"));
        ctx
    }

    pub fn render(&self, template: &str, ctx: &Context) -> Result<String, tera::Error> {
        self.templates.render(template, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colours_fall_back() {
        let theme = Theme {
            mode: ThemeMode::Light,
            accent: "hotpink".into(),
            neutral: "#111".into(),
        };
        let vars = ThemeVars::from(&theme);
        assert_eq!(vars.accent, Theme::default().accent);
        assert_eq!(vars.background, "#ffffff");
        assert_eq!(vars.foreground, "#111");
        assert!(vars.css.contains("--accent: #6366f1;"));
    }

    #[test]
    fn every_icon_is_registered() {
        let site = SiteContext::new(&Config::new("Jane")).unwrap();
        for icon in Icon::all() {
            assert!(site.icons[icon.name()].contains("<path"));
        }
    }

    #[test]
    fn absolute_url_uses_base() {
        let mut cfg = Config::new("Jane");
        cfg.site.base_url = Some("https://jane.dev/".into());
        let site = SiteContext::new(&cfg).unwrap();
        assert_eq!(site.absolute_url("/og/fleet"), "https://jane.dev/og/fleet");
        assert_eq!(
            SiteContext::new(&Config::new("Jane")).unwrap().absolute_url("/og"),
            "/og"
        );
    }
}
