//! Drives one build: pages first, then the artifacts derived from them.

use crate::assemble::{Assembler, AssetVersion};
use crate::document::Slot;
use crate::emit::{emit_artifacts, write_file};
use crate::error::Result;
use crate::render::Renderer;
use chrono::NaiveDate;
use log::info;
use prerender_kit_core::{
    ArtifactKind, ContentRecord, GeneratedArtifact, RouteDescriptor, SiteConfig,
};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub artifacts: Vec<GeneratedArtifact>,
    pub missing_slots: Vec<Slot>,
    pub version: AssetVersion,
}

impl BuildSummary {
    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }
}

pub struct SiteGenerator<'a> {
    renderer: &'a Renderer<'a>,
    assembler: &'a Assembler<'a>,
    build_date: NaiveDate,
}

impl<'a> SiteGenerator<'a> {
    pub fn new(
        renderer: &'a Renderer<'a>,
        assembler: &'a Assembler<'a>,
        build_date: NaiveDate,
    ) -> Self {
        Self {
            renderer,
            assembler,
            build_date,
        }
    }

    /// Write one page per route into `output`, then emit the artifacts.
    ///
    /// Every run regenerates everything; nothing is reused from an earlier build.
    pub fn generate(
        &self,
        site: &SiteConfig,
        routes: &[RouteDescriptor],
        records: &[ContentRecord],
        output: &Path,
    ) -> Result<BuildSummary> {
        let mut artifacts = Vec::with_capacity(routes.len());

        for route in routes {
            let fragment = self.renderer.render_fragment(route, records);
            let html = self.assembler.assemble_page(&fragment, route);
            let relative = route.output_file();
            let written = write_file(output, &relative.to_string_lossy(), &html)?;
            info!(target: "build", "{} -> {}", route.path, relative.display());
            artifacts.push(GeneratedArtifact::new(ArtifactKind::Page, written));
        }
        let pages = artifacts.len();

        artifacts.extend(emit_artifacts(site, routes, output, self.build_date)?);

        Ok(BuildSummary {
            pages,
            artifacts,
            missing_slots: self.assembler.missing_slots().to_vec(),
            version: self.assembler.version(),
        })
    }
}
