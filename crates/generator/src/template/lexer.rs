use super::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Each,
    If,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Each => "each",
            BlockKind::If => "if",
        }
    }
}

/// Flat token stream. Offsets are byte positions of the opening `{`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Variable { path: &'a str, raw: &'a str },
    EachOpen { list: &'a str, item: &'a str, offset: usize },
    IfOpen { condition: &'a str, offset: usize },
    Close { kind: BlockKind, offset: usize },
}

/// Split a template into tokens.
///
/// Braces that do not form a construct (CSS rules, inline scripts, `{ spaced }`)
/// stay in the surrounding text.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(found) = src[pos..].find('{') {
        let start = pos + found;
        let Some(end) = tag_end(src, start) else {
            pos = start + 1;
            continue;
        };

        let inner = &src[start + 1..end];
        match classify(inner, &src[start..=end], start)? {
            Some(token) => {
                if text_start < start {
                    tokens.push(Token::Text(&src[text_start..start]));
                }
                tokens.push(token);
                pos = end + 1;
                text_start = pos;
            }
            None => pos = start + 1,
        }
    }

    if text_start < src.len() {
        tokens.push(Token::Text(&src[text_start..]));
    }

    Ok(tokens)
}

/// Index of the `}` closing the tag opened at `start`, if no other `{` comes first
fn tag_end(src: &str, start: usize) -> Option<usize> {
    let rest = &src[start + 1..];
    let idx = rest.find(['{', '}'])?;
    (rest.as_bytes()[idx] == b'}').then_some(start + 1 + idx)
}

fn classify<'a>(
    inner: &'a str,
    raw: &'a str,
    offset: usize,
) -> Result<Option<Token<'a>>, TemplateError> {
    if let Some(rest) = inner.strip_prefix("#each") {
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return Ok(None);
        }
        let parts: Vec<&str> = rest.split_whitespace().collect();
        return match parts.as_slice() {
            [list, "as", item] if is_path(list) && is_identifier(item) => {
                Ok(Some(Token::EachOpen {
                    list: *list,
                    item: *item,
                    offset,
                }))
            }
            _ => Err(TemplateError::MalformedTag {
                tag: raw.to_string(),
                offset,
            }),
        };
    }

    if let Some(rest) = inner.strip_prefix("#if") {
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return Ok(None);
        }
        let parts: Vec<&str> = rest.split_whitespace().collect();
        return match parts.as_slice() {
            [condition] if is_path(condition) => Ok(Some(Token::IfOpen {
                condition: *condition,
                offset,
            })),
            _ => Err(TemplateError::MalformedTag {
                tag: raw.to_string(),
                offset,
            }),
        };
    }

    match inner.trim() {
        "/each" => return Ok(Some(Token::Close { kind: BlockKind::Each, offset })),
        "/if" => return Ok(Some(Token::Close { kind: BlockKind::If, offset })),
        _ => {}
    }

    if is_path(inner) {
        return Ok(Some(Token::Variable { path: inner, raw }));
    }

    Ok(None)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `name`, `item.title`, `items.0`
fn is_path(s: &str) -> bool {
    let mut segments = s.split('.');
    segments.next().is_some_and(is_identifier)
        && segments.all(|seg| is_identifier(seg) || is_index(seg))
}

fn is_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
