//! Wikilink syntax: `[[Name]]` where the name is letters, digits, hyphens and spaces,
//! or exactly the identity of a known note or asset.

use crate::corpus::KnownTargets;
use regex::Regex;
use std::sync::OnceLock;

static LINK_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn link_name_regex() -> &'static Regex {
    LINK_NAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9\- ]+$").unwrap())
}

/// A piece of note text, split at wikilinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t, 'k> {
    Text(&'t str),
    /// `href` is `None` for a dangling link
    Link { name: &'t str, href: Option<&'k str> },
}

/// Split `text` into plain text and wikilinks.
///
/// A `[[body]]` whose body is exactly a known identity is a link whatever
/// characters it contains. Otherwise the body must satisfy the link grammar.
/// On a failed match one `[` is emitted as text and scanning resumes after it,
/// so `[[[B]]]` still finds `B`.
pub fn segments<'t, 'k>(text: &'t str, known: &'k KnownTargets) -> Vec<Segment<'t, 'k>> {
    let mut out = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("[[") {
        if start > 0 {
            out.push(Segment::Text(&remaining[..start]));
        }
        let body = &remaining[start + 2..];

        if let Some(end) = body.find("]]") {
            let name = &body[..end];
            let href = known.href(name);
            if href.is_some() || is_link_name(name) {
                out.push(Segment::Link { name, href });
                remaining = &body[end + 2..];
                continue;
            }
        }

        out.push(Segment::Text(&remaining[start..start + 1]));
        remaining = &remaining[start + 1..];
    }
    if !remaining.is_empty() {
        out.push(Segment::Text(remaining));
    }
    out
}

/// Link targets in `text`, in order of appearance, resolved against `known`
pub fn extract_targets<'t>(text: &'t str, known: &KnownTargets) -> Vec<&'t str> {
    segments(text, known)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Link { name, .. } => Some(name),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Extract target names referenced via `[[Name]]`, in order of appearance.
///
/// Bracket sequences whose body falls outside the link grammar are plain text.
///
/// # Example
///
/// ```
/// use linkweave_core::wikilinks::extract_wikilinks;
///
/// let links = extract_wikilinks("See [[Rust Safety]], [[not/a link]] and [[B]]");
/// assert_eq!(links, vec!["Rust Safety", "B"]);
/// ```
pub fn extract_wikilinks(text: &str) -> Vec<&str> {
    extract_targets(text, &KnownTargets::default())
}

/// Whether `name` can appear inside `[[...]]` as a link target
pub fn is_link_name(name: &str) -> bool {
    link_name_regex().is_match(name)
}
