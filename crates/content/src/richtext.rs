//! Conversion of CMS field values into plain text or HTML.

use crate::ContentError;
use prerender_kit_core::html::html_escape;
use pulldown_cmark::{Options, Parser, html};
use serde::Deserialize;

/// A text-ish field: plain/Markdown string or structured rich text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RichField {
    Text(String),
    Blocks(Vec<RichTextBlock>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl RichField {
    /// Flatten to plain text. Blocks are joined by a single space.
    pub fn to_plain_text(&self) -> String {
        match self {
            RichField::Text(text) => text.trim().to_string(),
            RichField::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| b.text.as_deref())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Render to HTML. Strings are treated as Markdown.
    pub fn to_html(&self) -> Result<String, ContentError> {
        match self {
            RichField::Text(markdown) => Ok(markdown_to_html(markdown)),
            RichField::Blocks(blocks) => blocks_to_html(blocks),
        }
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[derive(Clone, Copy, PartialEq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Render structured rich text. Consecutive list items share one list element.
pub fn blocks_to_html(blocks: &[RichTextBlock]) -> Result<String, ContentError> {
    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        let list = match block.kind.as_str() {
            "list-item" => Some(ListKind::Unordered),
            "o-list-item" => Some(ListKind::Ordered),
            _ => None,
        };

        if open_list != list {
            if let Some(kind) = open_list {
                out.push_str(&format!("</{}>", kind.tag()));
            }
            if let Some(kind) = list {
                out.push_str(&format!("<{}>", kind.tag()));
            }
            open_list = list;
        }

        let text = block.text.as_deref().map(html_escape).unwrap_or_default();
        match block.kind.as_str() {
            "paragraph" => out.push_str(&format!("<p>{}</p>", text)),
            "preformatted" => out.push_str(&format!("<pre>{}</pre>", text)),
            "list-item" | "o-list-item" => out.push_str(&format!("<li>{}</li>", text)),
            "image" => {
                let url = block.url.as_deref().ok_or_else(|| {
                    ContentError::Conversion("image block without url".to_string())
                })?;
                let alt = block.alt.as_deref().map(html_escape).unwrap_or_default();
                out.push_str(&format!(
                    r#"<img src="{}" alt="{}" loading="lazy">"#,
                    html_escape(url),
                    alt
                ));
            }
            kind => match heading_level(kind) {
                Some(level) => out.push_str(&format!("<h{0}>{1}</h{0}>", level, text)),
                None => {
                    return Err(ContentError::Conversion(format!(
                        "unsupported rich text block '{}'",
                        kind
                    )));
                }
            },
        }
    }

    if let Some(kind) = open_list {
        out.push_str(&format!("</{}>", kind.tag()));
    }

    Ok(out)
}

fn heading_level(kind: &str) -> Option<u8> {
    let level: u8 = kind.strip_prefix("heading")?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}
