//! Runtime page templates backed by Tera.

use linkweave_core::{Page, PageRenderer, RenderError};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;

/// Name the user template is registered under.
///
/// No extension, so Tera does not autoescape: `Body` is inserted as markup.
const PAGE_TEMPLATE: &str = "page";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse template: {}", error_chain(.0))]
    Parse(#[source] tera::Error),
}

/// Page template loaded once and rendered for every note.
///
/// The template sees `Title`, `Body`, and `Incoming` (a list of `{Href, Name}`):
///
/// ```
/// use linkweave_core::{Page, PageRenderer};
/// use linkweave_render::TeraPageRenderer;
///
/// let renderer = TeraPageRenderer::from_source(
///     "<h1>{{ Title }}</h1>{{ Body }}{% for l in Incoming %}<a href=\"{{ l.Href }}\">{{ l.Name }}</a>{% endfor %}",
/// )
/// .unwrap();
/// let page = Page::assemble("B", "<p>hi</p>", ["A"]);
/// let html = String::from_utf8(renderer.render_page(&page).unwrap()).unwrap();
/// assert_eq!(html, "<h1>B</h1><p>hi</p><a href=\"A.html\">A</a>");
/// ```
pub struct TeraPageRenderer {
    tera: Tera,
}

impl TeraPageRenderer {
    /// Read and compile the template at `path`
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded template {:?} ({} bytes)", path, source.len());
        Self::from_source(&source)
    }

    /// Compile a template from source text
    pub fn from_source(source: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE, source)
            .map_err(TemplateError::Parse)?;
        Ok(Self { tera })
    }

    /// Render a page to a string
    pub fn render(&self, page: &Page) -> Result<String, tera::Error> {
        let context = Context::from_serialize(page)?;
        self.tera.render(PAGE_TEMPLATE, &context)
    }
}

impl PageRenderer for TeraPageRenderer {
    fn render_page(&self, page: &Page) -> Result<Vec<u8>, RenderError> {
        self.render(page)
            .map(String::into_bytes)
            .map_err(|err| RenderError::with_source(error_chain(&err), err))
    }
}

/// Tera nests the useful part of its errors; flatten the chain into one line
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
