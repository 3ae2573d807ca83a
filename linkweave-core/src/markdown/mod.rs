//! Markdown processing pipeline.

pub mod external_links;

use crate::config::MarkdownConfig;
use pulldown_cmark::{html, Event, Options, Parser};

pub use external_links::ExternalLinkTransformer;

/// Renders raw note text to an HTML fragment
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Markdown processor backed by pulldown-cmark
pub struct MarkdownProcessor {
    options: Options,
    href_target_blank: bool,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self {
            options,
            href_target_blank: config.href_target_blank,
        }
    }

    /// Convert markdown to HTML
    pub fn convert(&self, markdown: &str) -> String {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        let events = if self.href_target_blank {
            ExternalLinkTransformer::new().transform(events)
        } else {
            events
        };

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for MarkdownProcessor {
    fn render(&self, markdown: &str) -> String {
        self.convert(markdown)
    }
}
