//! Adds `target="_blank"` to links with an absolute URL.

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "ftp://"];

/// Transformer for external links
pub struct ExternalLinkTransformer;

impl ExternalLinkTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Replace absolute-URL links with raw anchors carrying `target="_blank"`
    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut result = Vec::with_capacity(events.len());
        // One entry per open link: whether it was rewritten
        let mut open: Vec<bool> = Vec::new();

        for event in events {
            match &event {
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) => {
                    let external = is_absolute(dest_url);
                    open.push(external);
                    if external {
                        result.push(Event::InlineHtml(open_tag(dest_url, title).into()));
                        continue;
                    }
                }
                Event::End(TagEnd::Link) => {
                    if open.pop() == Some(true) {
                        result.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                        continue;
                    }
                }
                _ => {}
            }
            result.push(event);
        }

        result
    }
}

impl Default for ExternalLinkTransformer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_absolute(url: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|p| url.starts_with(p))
}

fn open_tag(href: &str, title: &str) -> String {
    let mut tag = format!("<a href=\"{}\"", attr_escape(href));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", attr_escape(title)));
    }
    tag.push_str(" target=\"_blank\">");
    tag
}

fn attr_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
