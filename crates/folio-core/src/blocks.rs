use crate::types::ImageRef;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Mark / Span
// ---------------------------------------------------------------------------

/// Inline decoration applied to a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link { href: String },
}

/// A run of text with zero or more marks.
///
/// In YAML content a span may be written as a bare string when it carries no
/// marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SpanRepr")]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpanRepr {
    Plain(String),
    Marked {
        text: String,
        #[serde(default)]
        marks: Vec<Mark>,
    },
}

impl From<SpanRepr> for Span {
    fn from(repr: SpanRepr) -> Self {
        match repr {
            SpanRepr::Plain(text) => Span::plain(text),
            SpanRepr::Marked { text, marks } => Span { text, marks },
        }
    }
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// ContentBlock
// ---------------------------------------------------------------------------

/// One block of rich case-study content.
///
/// The variant set is closed. Content stores that emit other block kinds are
/// expected to drop them when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        spans: Vec<Span>,
    },
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<Vec<Span>>,
    },
    Image {
        image: ImageRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Quote {
        spans: Vec<Span>,
    },
}

impl ContentBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            spans: vec![Span::plain(text)],
        }
    }

    /// Text content with all marks stripped. Images contribute their caption.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Paragraph { spans }
            | ContentBlock::Heading { spans, .. }
            | ContentBlock::Quote { spans } => spans_text(spans),
            ContentBlock::List { items, .. } => items
                .iter()
                .map(|item| spans_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::Image { caption, .. } => caption.clone().unwrap_or_default(),
        }
    }
}
