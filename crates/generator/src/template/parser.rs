use super::TemplateError;
use super::lexer::{BlockKind, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    /// `raw` is emitted unchanged when the path does not resolve
    Variable { path: String, raw: String },
    Each {
        list: String,
        item: String,
        body: Vec<Node>,
    },
    If {
        condition: String,
        body: Vec<Node>,
    },
}

/// Build the node tree from a token stream
pub fn parse(tokens: &[Token<'_>]) -> Result<Vec<Node>, TemplateError> {
    let mut pos = 0;
    let nodes = parse_block(tokens, &mut pos, None)?;
    Ok(nodes)
}

/// Parse until the matching close of `open` (or end of input when `open` is `None`)
fn parse_block(
    tokens: &[Token<'_>],
    pos: &mut usize,
    open: Option<(BlockKind, usize)>,
) -> Result<Vec<Node>, TemplateError> {
    let mut nodes = Vec::new();

    while let Some(token) = tokens.get(*pos) {
        *pos += 1;
        match *token {
            Token::Text(text) => nodes.push(Node::Text(text.to_string())),
            Token::Variable { path, raw } => nodes.push(Node::Variable {
                path: path.to_string(),
                raw: raw.to_string(),
            }),
            Token::EachOpen { list, item, offset } => {
                let body = parse_block(tokens, pos, Some((BlockKind::Each, offset)))?;
                nodes.push(Node::Each {
                    list: list.to_string(),
                    item: item.to_string(),
                    body,
                });
            }
            Token::IfOpen { condition, offset } => {
                let body = parse_block(tokens, pos, Some((BlockKind::If, offset)))?;
                nodes.push(Node::If {
                    condition: condition.to_string(),
                    body,
                });
            }
            Token::Close { kind, offset } => {
                return match open {
                    Some((expected, _)) if expected == kind => Ok(nodes),
                    Some((expected, _)) => Err(TemplateError::MismatchedClose {
                        expected: expected.as_str(),
                        found: kind.as_str(),
                        offset,
                    }),
                    None => Err(TemplateError::UnexpectedClose {
                        block: kind.as_str(),
                        offset,
                    }),
                };
            }
        }
    }

    match open {
        Some((kind, offset)) => Err(TemplateError::Unclosed {
            block: kind.as_str(),
            offset,
        }),
        None => Ok(nodes),
    }
}
