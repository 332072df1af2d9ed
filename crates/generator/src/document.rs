//! The bundler's `index.html`, parsed once into literal text and named slots.
//!
//! Slots are addressed by role rather than by the exact text the bundler
//! happened to emit, so attribute order and whitespace do not matter.

use log::warn;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Title,
    Description,
    OgTitle,
    OgDescription,
    OgUrl,
    TwitterTitle,
    TwitterDescription,
    TwitterUrl,
    /// Interior of the root mount element
    Mount,
    /// Immediately before the main bundle script
    Hydration,
    /// Existing canonical link, or just before `</head>`
    Canonical,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::Title,
        Slot::Description,
        Slot::OgTitle,
        Slot::OgDescription,
        Slot::OgUrl,
        Slot::TwitterTitle,
        Slot::TwitterDescription,
        Slot::TwitterUrl,
        Slot::Mount,
        Slot::Hydration,
        Slot::Canonical,
    ];

    /// Without these the page would not work as a pre-rendered page at all
    pub fn is_essential(self) -> bool {
        matches!(self, Slot::Mount | Slot::Hydration)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Title => "<title>",
            Slot::Description => "meta description",
            Slot::OgTitle => "og:title",
            Slot::OgDescription => "og:description",
            Slot::OgUrl => "og:url",
            Slot::TwitterTitle => "twitter:title",
            Slot::TwitterDescription => "twitter:description",
            Slot::TwitterUrl => "twitter:url",
            Slot::Mount => "root mount element",
            Slot::Hydration => "module bundle script",
            Slot::Canonical => "canonical link / </head>",
        };
        f.write_str(name)
    }
}

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").unwrap());
static META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<meta\b[^>]*>").unwrap());
static META_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:name|property)\s*=\s*["']([^"']+)["']"#).unwrap()
});
static MOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div\b[^>]*\bid\s*=\s*["']root["'][^>]*>([^<]*)</div\s*>"#).unwrap()
});
static SCRIPT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<script\b[^>]*>").unwrap());
static MODULE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\btype\s*=\s*["']module["']"#).unwrap());
static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsrc\s*=").unwrap());
static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*\brel\s*=\s*["']canonical["'][^>]*>"#).unwrap()
});
static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head\s*>").unwrap());
static ASSET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(src|href)\s*=\s*"(/assets/[^"?#]*)""#).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    segments: Vec<Segment>,
    missing: Vec<Slot>,
}

impl DocumentTemplate {
    /// Locate every slot. Slots that cannot be found are logged and skipped.
    pub fn parse(html: &str) -> Self {
        let mut found: Vec<(Range<usize>, Slot)> = Vec::new();

        if let Some(m) = TITLE.find(html) {
            found.push((m.range(), Slot::Title));
        }

        for m in META.find_iter(html) {
            let Some(key) = META_KEY.captures(m.as_str()).and_then(|c| c.get(1)) else {
                continue;
            };
            let slot = match key.as_str().to_ascii_lowercase().as_str() {
                "description" => Slot::Description,
                "og:title" => Slot::OgTitle,
                "og:description" => Slot::OgDescription,
                "og:url" => Slot::OgUrl,
                "twitter:title" => Slot::TwitterTitle,
                "twitter:description" => Slot::TwitterDescription,
                "twitter:url" => Slot::TwitterUrl,
                _ => continue,
            };
            if !found.iter().any(|(_, s)| *s == slot) {
                found.push((m.range(), slot));
            }
        }

        if let Some(interior) = MOUNT.captures(html).and_then(|c| c.get(1)) {
            found.push((interior.range(), Slot::Mount));
        }

        let bundle = SCRIPT
            .find_iter(html)
            .find(|m| MODULE_TYPE.is_match(m.as_str()) && SRC_ATTR.is_match(m.as_str()));
        if let Some(m) = bundle {
            found.push((m.start()..m.start(), Slot::Hydration));
        }

        if let Some(m) = CANONICAL.find(html) {
            found.push((m.range(), Slot::Canonical));
        } else if let Some(m) = HEAD_CLOSE.find(html) {
            found.push((m.start()..m.start(), Slot::Canonical));
        }

        found.sort_by_key(|(range, _)| (range.start, range.end));

        let mut segments = Vec::new();
        let mut placed = Vec::new();
        let mut cursor = 0;
        for (range, slot) in found {
            if range.start < cursor {
                warn!(target: "assemble", "Template slot {} overlaps another slot; ignoring it", slot);
                continue;
            }
            if cursor < range.start {
                segments.push(Segment::Literal(html[cursor..range.start].to_string()));
            }
            segments.push(Segment::Slot(slot));
            placed.push(slot);
            cursor = range.end;
        }
        if cursor < html.len() {
            segments.push(Segment::Literal(html[cursor..].to_string()));
        }

        let missing: Vec<Slot> = Slot::ALL
            .into_iter()
            .filter(|slot| !placed.contains(slot))
            .collect();
        for slot in &missing {
            warn!(target: "assemble", "Template has no {}; it will not be filled", slot);
        }

        Self { segments, missing }
    }

    /// Slots the template did not provide
    pub fn missing_slots(&self) -> &[Slot] {
        &self.missing
    }

    /// Append `?v={version}` to every `/assets/...` URL in `src`/`href` attributes
    pub fn bust_asset_urls(&mut self, version: &str) {
        for segment in &mut self.segments {
            if let Segment::Literal(text) = segment
                && ASSET_URL.is_match(text)
            {
                let replacement = format!(r#"${{1}}="${{2}}?v={}""#, version);
                *text = ASSET_URL.replace_all(text, replacement.as_str()).into_owned();
            }
        }
    }

    /// Produce the document, asking `fill` for the content of each slot
    pub fn render<F>(&self, mut fill: F) -> String
    where
        F: FnMut(Slot) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(&fill(*slot)),
            }
        }
        out
    }
}
