//! Static pre-rendering of the marketing site.
//!
//! Routes are rendered to body fragments, wrapped into the bundler's
//! `index.html`, and written out together with sitemap, redirect shims and
//! server configuration.

pub mod assemble;
pub mod build;
pub mod document;
pub mod emit;
pub mod error;
pub mod pages;
pub mod render;
pub mod routes;
pub mod template;

#[cfg(test)]
mod test_support;

pub use assemble::{Assembler, AssetVersion, INITIAL_STATE_GLOBAL, is_prerendered};
pub use build::{BuildSummary, SiteGenerator};
pub use document::{DocumentTemplate, Slot};
pub use error::{GenerateError, Result};
pub use render::{Renderer, load_components};
pub use routes::build_routes;
pub use template::{Template, TemplateError, process_template};
