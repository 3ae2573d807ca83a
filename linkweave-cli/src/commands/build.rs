//! Build command implementation.

use anyhow::{bail, Context, Result};
use linkweave_core::{prepare_destination, write_site, Config, Corpus, MarkdownProcessor, SiteBuilder};
use linkweave_render::TeraPageRenderer;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Paths given on the command line; each overrides the config file
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub src: Option<PathBuf>,
    pub dst: Option<PathBuf>,
    pub tpl: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Fully resolved inputs of one build
#[derive(Debug)]
struct Settings {
    src: PathBuf,
    dst: PathBuf,
    tpl: PathBuf,
    config: Config,
}

impl Settings {
    fn resolve(options: BuildOptions) -> Result<Self> {
        let config = match &options.config {
            Some(path) => {
                tracing::info!("Loading config from {:?}", path);
                Config::from_file(path).context("Failed to load configuration")?
            }
            None => Config::default(),
        };

        let src = options
            .src
            .or_else(|| config.source_dir())
            .context("missing -src")?;
        let dst = options
            .dst
            .or_else(|| config.output_dir())
            .context("missing -dst")?;
        let tpl = options
            .tpl
            .or_else(|| config.template_path())
            .context("missing -tpl")?;

        Ok(Self {
            src,
            dst,
            tpl,
            config,
        })
    }
}

/// Build the site: wipe the destination, compile the template, load notes, render, write
pub fn build_site(options: BuildOptions) -> Result<()> {
    let started = Instant::now();
    let settings = Settings::resolve(options)?;
    guard_source(&settings.src, &settings.dst)?;

    tracing::info!("Building {:?} -> {:?}", settings.src, settings.dst);

    prepare_destination(&settings.dst).context("Failed to prepare output directory")?;

    let renderer = TeraPageRenderer::from_file(&settings.tpl).context("Failed to load template")?;

    let policy = settings.config.extension_policy();
    let corpus = Corpus::load(&settings.src, &policy).context("Failed to load notes")?;
    tracing::info!("Loaded {} entries", corpus.len());

    let markdown = MarkdownProcessor::from_config(&settings.config.markdown);
    let site = SiteBuilder::new(&markdown, &renderer)
        .copy_assets(settings.config.copy_assets)
        .build(&corpus)
        .context("Failed to build site")?;

    write_site(&settings.dst, &site).context("Failed to write site")?;

    tracing::info!(
        "✓ Wrote {} files to {:?} in {:.2?}",
        site.len(),
        settings.dst,
        started.elapsed()
    );
    Ok(())
}

/// Refuse to wipe a destination that holds the notes themselves
fn guard_source(src: &Path, dst: &Path) -> Result<()> {
    let (Ok(src), Ok(dst)) = (src.canonicalize(), dst.canonicalize()) else {
        return Ok(());
    };
    if src.starts_with(&dst) {
        bail!("destination {:?} contains the source directory {:?}", dst, src);
    }
    Ok(())
}
