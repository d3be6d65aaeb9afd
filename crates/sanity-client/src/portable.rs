//! Portable text → [`ContentBlock`] decoding.
//!
//! Consecutive list-item blocks of the same kind are grouped into one
//! [`ContentBlock::List`]. Block types outside the closed set are dropped.

use crate::image::RawImage;
use folio_core::blocks::{ContentBlock, Mark, Span};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    style: Option<String>,
    #[serde(default, rename = "listItem")]
    list_item: Option<String>,
    #[serde(default)]
    children: Vec<RawSpan>,
    #[serde(default, rename = "markDefs")]
    mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Deserialize)]
struct RawSpan {
    #[serde(default)]
    text: String,
    #[serde(default)]
    marks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MarkDef {
    #[serde(rename = "_key")]
    key: String,
    #[serde(rename = "_type")]
    kind: String,
    #[serde(default)]
    href: Option<String>,
}

impl RawBlock {
    fn spans(&self) -> Vec<Span> {
        self.children
            .iter()
            .filter(|c| !c.text.is_empty())
            .map(|c| Span::marked(c.text.clone(), self.marks(&c.marks)))
            .collect()
    }

    fn marks(&self, names: &[String]) -> Vec<Mark> {
        names
            .iter()
            .filter_map(|name| match name.as_str() {
                "strong" => Some(Mark::Strong),
                "em" => Some(Mark::Em),
                "code" => Some(Mark::Code),
                key => self
                    .mark_defs
                    .iter()
                    .find(|d| d.key == key && d.kind == "link")
                    .and_then(|d| d.href.clone())
                    .map(|href| Mark::Link { href }),
            })
            .collect()
    }
}

fn heading_level(style: &str) -> Option<u8> {
    match style {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" | "h5" | "h6" => Some(4),
        _ => None,
    }
}

struct PendingList {
    ordered: bool,
    items: Vec<Vec<Span>>,
}

/// Decode a portable-text array. Image blocks are resolved against
/// `project_id`/`dataset`.
pub fn decode(values: &[Value], project_id: &str, dataset: &str) -> Vec<ContentBlock> {
    let mut out = Vec::new();
    let mut list: Option<PendingList> = None;

    for value in values {
        let kind = value.get("_type").and_then(Value::as_str).unwrap_or("");
        match kind {
            "block" => {
                let raw: RawBlock = match serde_json::from_value(value.clone()) {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::debug!(error = %e, "dropping malformed portable-text block");
                        continue;
                    }
                };
                let spans = raw.spans();
                if let Some(item) = raw.list_item.as_deref() {
                    let ordered = item == "number";
                    match list.as_mut() {
                        Some(pending) if pending.ordered == ordered => pending.items.push(spans),
                        _ => {
                            flush(&mut out, list.take());
                            list = Some(PendingList {
                                ordered,
                                items: vec![spans],
                            });
                        }
                    }
                    continue;
                }
                flush(&mut out, list.take());
                if spans.iter().all(|s| s.text.trim().is_empty()) {
                    continue;
                }
                let style = raw.style.as_deref().unwrap_or("normal");
                out.push(match (style, heading_level(style)) {
                    (_, Some(level)) => ContentBlock::Heading { level, spans },
                    ("blockquote", None) => ContentBlock::Quote { spans },
                    _ => ContentBlock::Paragraph { spans },
                });
            }
            "image" => {
                flush(&mut out, list.take());
                let resolved = serde_json::from_value::<RawImage>(value.clone())
                    .ok()
                    .and_then(|raw| {
                        let caption = raw.caption.clone().filter(|c| !c.trim().is_empty());
                        raw.resolve(project_id, dataset).map(|image| (image, caption))
                    });
                match resolved {
                    Some((image, caption)) => out.push(ContentBlock::Image { image, caption }),
                    None => tracing::debug!("dropping image block without an asset"),
                }
            }
            other => {
                flush(&mut out, list.take());
                tracing::debug!(block_type = other, "dropping unsupported content block");
            }
        }
    }
    flush(&mut out, list);
    out
}

fn flush(out: &mut Vec<ContentBlock>, list: Option<PendingList>) {
    if let Some(PendingList { ordered, items }) = list {
        out.push(ContentBlock::List { ordered, items });
    }
}
