//! Site building logic - orchestrates link resolution, rendering, and output.

use crate::{
    corpus::{Corpus, Entry},
    error::BuildError,
    graph::IncomingIndex,
    markdown::MarkdownRenderer,
    output::SiteOutput,
    page::{Page, PageRenderer},
    resolve::LinkResolver,
};

/// Main site builder
pub struct SiteBuilder<'a> {
    markdown: &'a dyn MarkdownRenderer,
    pages: &'a dyn PageRenderer,
    copy_assets: bool,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(markdown: &'a dyn MarkdownRenderer, pages: &'a dyn PageRenderer) -> Self {
        Self {
            markdown,
            pages,
            copy_assets: true,
        }
    }

    /// Whether image assets are copied into the output
    pub fn copy_assets(mut self, copy: bool) -> Self {
        self.copy_assets = copy;
        self
    }

    /// Build every page of the site in memory.
    ///
    /// The incoming-link index is complete before the first page is rendered.
    /// The first render failure aborts the build.
    pub fn build(&self, corpus: &Corpus) -> Result<SiteOutput, BuildError> {
        let known = corpus.known_targets();
        let index = IncomingIndex::build_with(corpus, &known);
        let resolver = LinkResolver::new(&known);

        let mut site = SiteOutput::new();
        let mut pages = 0;

        for note in corpus.notes() {
            let page = self.assemble_page(note, &resolver, &index);
            let bytes = self
                .pages
                .render_page(&page)
                .map_err(|source| BuildError::Render {
                    path: note.rel_path.clone(),
                    source,
                })?;
            emit(&mut site, note, bytes);
            pages += 1;
        }

        if self.copy_assets {
            for asset in corpus.assets() {
                emit(&mut site, asset, asset.bytes().to_vec());
            }
        } else {
            tracing::debug!("Asset copying disabled");
        }

        tracing::info!("Built {} pages ({} output files)", pages, site.len());
        Ok(site)
    }

    /// Rewrite, render and collect backlinks for a single note
    pub fn assemble_page(
        &self,
        note: &Entry,
        resolver: &LinkResolver<'_>,
        index: &IncomingIndex,
    ) -> Page {
        let (text, dangling) = resolver.rewrite(note.text().unwrap_or_default());
        for name in &dangling {
            tracing::debug!("Dangling link [[{}]] in {}", name, note.rel_path);
        }

        let body = self.markdown.render(&text);
        Page::assemble(note.title(), body, index.backlinks(&note.identity))
    }
}

fn emit(site: &mut SiteOutput, entry: &Entry, bytes: Vec<u8>) {
    let out = entry.output_rel_path();
    if site.insert(out.clone(), bytes) {
        tracing::warn!(
            "Output path collision at {}: {} overwrites an earlier file",
            out,
            entry.rel_path
        );
    } else {
        tracing::debug!("Rendered: {} -> {}", entry.rel_path, out);
    }
}
