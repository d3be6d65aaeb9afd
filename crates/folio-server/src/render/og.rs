//! Social-preview cards as 1200×630 SVG.

use crate::site::ThemeVars;
use tera::escape_html;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const TITLE_LINE_CHARS: usize = 26;
const TITLE_MAX_LINES: usize = 3;
const MAX_TAGS: usize = 4;

/// Text drawn on a preview card.
#[derive(Debug, Clone, Default)]
pub struct OgCard {
    pub eyebrow: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub tags: Vec<String>,
}

/// Greedy word wrap. Overflowing text is cut and ellipsised on the last line.
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed <= max_chars || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        lines.push(std::mem::take(&mut current));
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        current.push_str(word);
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

pub fn render(card: &OgCard, theme: &ThemeVars) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
<rect width="100%" height="100%" fill="{bg}"/>
<rect x="0" y="0" width="16" height="{HEIGHT}" fill="{accent}"/>
<text x="80" y="120" font-family="Inter, Helvetica, Arial, sans-serif" font-size="28" font-weight="600" fill="{accent}" letter-spacing="2">{eyebrow}</text>
"#,
        bg = theme.background,
        accent = theme.accent,
        eyebrow = escape_html(&card.eyebrow.to_uppercase()),
    );

    let mut y = 230;
    for line in wrap(&card.title, TITLE_LINE_CHARS, TITLE_MAX_LINES) {
        svg.push_str(&format!(
            r#"<text x="80" y="{y}" font-family="Inter, Helvetica, Arial, sans-serif" font-size="72" font-weight="700" fill="{fg}">{}</text>
"#,
            escape_html(&line),
            fg = theme.foreground,
        ));
        y += 86;
    }

    if let Some(subtitle) = &card.subtitle {
        if let Some(line) = wrap(subtitle, 60, 1).into_iter().next() {
            svg.push_str(&format!(
                r#"<text x="80" y="{y}" font-family="Inter, Helvetica, Arial, sans-serif" font-size="30" fill="{fg}" fill-opacity="0.7">{}</text>
"#,
                escape_html(&line),
                fg = theme.foreground,
            ));
        }
    }

    let mut x = 80;
    for tag in card.tags.iter().take(MAX_TAGS) {
        let width = 28 + 14 * tag.chars().count() as u32;
        svg.push_str(&format!(
            r#"<rect x="{x}" y="530" rx="20" width="{width}" height="44" fill="none" stroke="{accent}" stroke-width="2"/>
<text x="{tx}" y="560" font-family="Inter, Helvetica, Arial, sans-serif" font-size="22" fill="{fg}">{}</text>
"#,
            escape_html(tag),
            tx = x + 14,
            accent = theme.accent,
            fg = theme.foreground,
        ));
        x += width + 16;
    }

    svg.push_str("</svg>\n");
    svg
}
