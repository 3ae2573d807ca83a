//! # linkweave-render
//!
//! Template rendering library for linkweave.
//!
//! This crate renders page models through a user-supplied Tera template.

pub mod templates;

pub use templates::{TemplateError, TeraPageRenderer};
