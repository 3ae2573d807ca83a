//! # linkweave-core
//!
//! Core library for the linkweave static site generator.
//!
//! This crate discovers a corpus of notes, resolves `[[wikilinks]]` between
//! them, computes backlinks, and produces the in-memory site that the CLI
//! writes to disk. Page templating is left to a [`PageRenderer`]
//! implementation.

pub mod builder;
pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod markdown;
pub mod output;
pub mod page;
pub mod resolve;
pub mod slug;
pub mod wikilinks;

pub use builder::SiteBuilder;
pub use config::{Config, ConfigError};
pub use corpus::{AssetKind, Corpus, Entry, ExtensionPolicy, KnownTargets};
pub use error::{BuildError, RenderError};
pub use graph::IncomingIndex;
pub use markdown::{MarkdownProcessor, MarkdownRenderer};
pub use output::{prepare_destination, write_site, SiteOutput};
pub use page::{LinkDescriptor, Page, PageRenderer};
pub use resolve::LinkResolver;
pub use slug::slugify;
