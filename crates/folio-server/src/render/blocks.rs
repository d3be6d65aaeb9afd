//! HTML rendering for rich case-study content.

use folio_core::blocks::{ContentBlock, Mark, Span};
use folio_core::types::ImageRef;
use tera::escape_html;

/// Render a section's blocks to an HTML fragment. All text is escaped.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(&mut out, block);
    }
    out
}

fn render_block(out: &mut String, block: &ContentBlock) {
    match block {
        ContentBlock::Paragraph { spans } => {
            out.push_str("<p>");
            render_spans(out, spans);
            out.push_str("</p>\n");
        }
        ContentBlock::Heading { level, spans } => {
            // h1 is the page title; section content starts at h3.
            let tag = format!("h{}", level.saturating_add(2).clamp(3, 6));
            out.push_str(&format!("<{tag}>"));
            render_spans(out, spans);
            out.push_str(&format!("</{tag}>\n"));
        }
        ContentBlock::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>\n"));
            for item in items {
                out.push_str("<li>");
                render_spans(out, item);
                out.push_str("</li>\n");
            }
            out.push_str(&format!("</{tag}>\n"));
        }
        ContentBlock::Image { image, caption } => {
            let Some(img) = image_tag(image, "block-image__img") else {
                return;
            };
            out.push_str("<figure class=\"block-image\">");
            out.push_str(&img);
            if let Some(caption) = caption {
                out.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
            }
            out.push_str("</figure>\n");
        }
        ContentBlock::Quote { spans } => {
            out.push_str("<blockquote>");
            render_spans(out, spans);
            out.push_str("</blockquote>\n");
        }
    }
}

fn render_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        let mut html = escape_html(&span.text);
        for mark in &span.marks {
            html = match mark {
                Mark::Strong => format!("<strong>{html}</strong>"),
                Mark::Em => format!("<em>{html}</em>"),
                Mark::Code => format!("<code>{html}</code>"),
                Mark::Link { href } if is_safe_href(href) => format!(
                    "<a href=\"{}\" rel=\"noopener\">{html}</a>",
                    escape_html(href)
                ),
                Mark::Link { .. } => html,
            };
        }
        out.push_str(&html);
    }
}

/// Only web, mail and site-relative links are rendered as anchors.
pub fn is_safe_href(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || (lower.starts_with('/') && !lower.starts_with("//"))
}

/// `<img>` for an image with a resolved URL.
pub fn image_tag(image: &ImageRef, class: &str) -> Option<String> {
    let url = image.url.as_deref()?;
    let mut tag = format!(
        "<img class=\"{class}\" src=\"{}\" alt=\"{}\" loading=\"lazy\"",
        escape_html(url),
        escape_html(image.alt.as_deref().unwrap_or(""))
    );
    if let Some((w, h)) = image.dimensions() {
        tag.push_str(&format!(" width=\"{w}\" height=\"{h}\""));
    }
    tag.push('>');
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text() {
        let html = render_blocks(&[ContentBlock::paragraph("<script>alert(1)</script>")]);
        assert!(!html.contains("<script>"));
        assert!(html.starts_with("<p>&lt;script&gt;"));
    }

    #[test]
    fn headings_shift_below_page_title() {
        let html = render_blocks(&[ContentBlock::Heading {
            level: 1,
            spans: vec![Span::plain("Intro")],
        }]);
        assert_eq!(html, "<h3>Intro</h3>\n");
    }

    #[test]
    fn marks_nest_and_unsafe_links_drop() {
        let html = render_blocks(&[ContentBlock::Paragraph {
            spans: vec![
                Span::marked("bold link", vec![Mark::Strong, Mark::Link { href: "https://a.example".into() }]),
                Span::marked("bad", vec![Mark::Link { href: "javascript:alert(1)".into() }]),
            ],
        }]);
        assert!(html.contains(
            "<a href=\"https:&#x2F;&#x2F;a.example\" rel=\"noopener\"><strong>bold link</strong></a>"
        ));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn lists_render_items() {
        let html = render_blocks(&[ContentBlock::List {
            ordered: true,
            items: vec![vec![Span::plain("one")], vec![Span::plain("two")]],
        }]);
        assert_eq!(html, "<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n");
    }

    #[test]
    fn images_without_url_are_skipped() {
        let html = render_blocks(&[ContentBlock::Image {
            image: ImageRef::new("asset-1"),
            caption: Some("hidden".into()),
        }]);
        assert!(html.is_empty());
    }

    #[test]
    fn image_carries_dimensions() {
        let mut image = ImageRef::new("a");
        image.url = Some("https://cdn.example/a.png".into());
        image.width = Some(640);
        image.height = Some(480);
        let tag = image_tag(&image, "x").unwrap();
        assert!(tag.contains("width=\"640\" height=\"480\""));
    }
}
