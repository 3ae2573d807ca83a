//! Page model handed to the template renderer.

use crate::error::RenderError;
use crate::slug::slugify;
use serde::Serialize;

/// A link shown in a page's backlinks panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkDescriptor {
    pub href: String,
    pub name: String,
}

impl LinkDescriptor {
    /// Descriptor for a note identity: `href` is the slugged name plus `.html`
    pub fn for_identity(identity: &str) -> Self {
        Self {
            href: format!("{}.html", slugify(identity)),
            name: identity.to_string(),
        }
    }
}

/// Everything a page template can see.
///
/// Serialized field names are `Title`, `Body` and `Incoming` (each entry with
/// `Href` and `Name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub title: String,
    /// Rendered HTML body
    pub body: String,
    /// Backlinks, sorted by name
    pub incoming: Vec<LinkDescriptor>,
}

impl Page {
    /// Build a page from its rendered body and the identities linking to it
    pub fn assemble<'s>(
        title: impl Into<String>,
        body: impl Into<String>,
        sources: impl IntoIterator<Item = &'s str>,
    ) -> Self {
        let mut incoming: Vec<LinkDescriptor> = sources
            .into_iter()
            .map(LinkDescriptor::for_identity)
            .collect();
        incoming.sort_by(|a, b| a.name.cmp(&b.name));
        incoming.dedup();

        Self {
            title: title.into(),
            body: body.into(),
            incoming,
        }
    }
}

/// Turns a page model into final output bytes
pub trait PageRenderer {
    fn render_page(&self, page: &Page) -> Result<Vec<u8>, RenderError>;
}
