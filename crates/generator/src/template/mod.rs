//! Interpolation engine for component templates.
//!
//! Supported constructs:
//!
//! ```text
//! {name}                              value of `name`, left as-is when missing
//! {release.title}                     dotted lookup into objects and arrays
//! {#each releases as r} ... {/each}   body once per element, `r` bound inside
//! {#if featured} ... {/if}            body only when `featured` is truthy
//! ```
//!
//! Blocks nest freely. Braces that are not one of the above are plain text.

mod lexer;
mod parser;
mod render;

use parser::Node;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("`{{#{block}}}` opened at byte {offset} is never closed")]
    Unclosed { block: &'static str, offset: usize },

    #[error("`{{/{block}}}` at byte {offset} has no matching open")]
    UnexpectedClose { block: &'static str, offset: usize },

    #[error("expected `{{/{expected}}}` but found `{{/{found}}}` at byte {offset}")]
    MismatchedClose {
        expected: &'static str,
        found: &'static str,
        offset: usize,
    },

    #[error("malformed tag `{tag}` at byte {offset}")]
    MalformedTag { tag: String, offset: usize },
}

/// A parsed template, reusable across renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(src: &str) -> Result<Self, TemplateError> {
        let tokens = lexer::tokenize(src)?;
        let nodes = parser::parse(&tokens)?;
        Ok(Self { nodes })
    }

    pub fn render(&self, data: &Value) -> String {
        render::render(&self.nodes, data)
    }
}

/// Parse and render in one go
pub fn process_template(src: &str, data: &Value) -> Result<String, TemplateError> {
    Ok(Template::parse(src)?.render(data))
}
