//! Wikilink rewriting: `[[Name]]` → HTML anchors, on raw note text.

use crate::corpus::KnownTargets;
use crate::wikilinks::{segments, Segment};

/// Rewrites wikilinks against the set of known identities
pub struct LinkResolver<'a> {
    known: &'a KnownTargets,
}

impl<'a> LinkResolver<'a> {
    pub fn new(known: &'a KnownTargets) -> Self {
        Self { known }
    }

    /// Rewrite every wikilink in `text`.
    ///
    /// A `[[...]]` body that exactly matches a known identity becomes a link to
    /// that target, whatever characters it contains. Otherwise a body matching
    /// the link grammar becomes a dangling `href="#"` anchor. Anything else is
    /// left as text.
    ///
    /// Returns (rewritten_text, dangling_names)
    pub fn rewrite(&self, text: &str) -> (String, Vec<String>) {
        let mut out = String::with_capacity(text.len());
        let mut dangling = Vec::new();

        for segment in segments(text, self.known) {
            match segment {
                Segment::Text(plain) => out.push_str(plain),
                Segment::Link {
                    name,
                    href: Some(href),
                } => push_anchor(&mut out, href, name),
                Segment::Link { name, href: None } => {
                    push_anchor(&mut out, "#", name);
                    dangling.push(name.to_string());
                }
            }
        }

        (out, dangling)
    }
}

fn push_anchor(out: &mut String, href: &str, text: &str) {
    out.push_str("<a href=\"");
    out.push_str(&html_escape(href));
    out.push_str("\">");
    out.push_str(&html_escape(text));
    out.push_str("</a>");
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, ExtensionPolicy};

    fn known(paths: &[&str]) -> KnownTargets {
        Corpus::from_memory(paths.iter().map(|p| (*p, "")), &ExtensionPolicy::default())
            .known_targets()
    }

    #[test]
    fn test_known_and_dangling() {
        let known = known(&["A.md", "B.md"]);
        let (text, dangling) = LinkResolver::new(&known).rewrite("See [[B]] and [[C]]");

        insta::assert_snapshot!(text, @r##"See <a href="./B.html">B</a> and <a href="#">C</a>"##);
        assert_eq!(dangling, vec!["C"]);
    }

    #[test]
    fn test_spaces_are_slugged_in_href_only() {
        let known = known(&["My Note.md"]);
        let (text, _) = LinkResolver::new(&known).rewrite("[[My Note]]");

        assert_eq!(text, r#"<a href="./My-Note.html">My Note</a>"#);
    }

    #[test]
    fn test_case_is_significant() {
        let known = known(&["Rust.md"]);
        let (text, dangling) = LinkResolver::new(&known).rewrite("[[rust]] [[Rust]]");

        assert_eq!(
            text,
            r##"<a href="#">rust</a> <a href="./Rust.html">Rust</a>"##
        );
        assert_eq!(dangling, vec!["rust"]);
    }

    #[test]
    fn test_known_identity_outside_grammar_resolves() {
        let known = known(&["journal/Day One.md", "Q&A.md"]);
        let (text, dangling) =
            LinkResolver::new(&known).rewrite("[[journal/Day One]] [[Q&A]] [[other/x]]");

        assert_eq!(
            text,
            r#"<a href="./journal/Day-One.html">journal/Day One</a> <a href="./Q&amp;A.html">Q&amp;A</a> [[other/x]]"#
        );
        assert!(dangling.is_empty());
    }

    #[test]
    fn test_image_identity_links_to_copied_file() {
        let known = known(&["img/Cat Pic.png"]);
        let (text, _) = LinkResolver::new(&known).rewrite("[[img/Cat Pic]]");

        assert_eq!(text, r#"<a href="./img/Cat-Pic.png">img/Cat Pic</a>"#);
    }

    #[test]
    fn test_malformed_sequences_untouched() {
        let known = known(&["B.md"]);
        let resolver = LinkResolver::new(&known);

        for input in ["[[", "]]", "[[]]", "[[unclosed", "[B]", "[[a|b]]"] {
            let (text, dangling) = resolver.rewrite(input);
            assert_eq!(text, input);
            assert!(dangling.is_empty());
        }
    }

    #[test]
    fn test_nested_brackets_resolve_inner_link() {
        let known = known(&["B.md"]);
        let (text, _) = LinkResolver::new(&known).rewrite("[[[B]]] and [[x [[B]]");

        assert_eq!(
            text,
            r#"[<a href="./B.html">B</a>] and [[x <a href="./B.html">B</a>"#
        );
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let known = known(&["B.md"]);
        let (text, _) = LinkResolver::new(&known).rewrite("café [[B]] — ünïcode [[");

        assert_eq!(text, r#"café <a href="./B.html">B</a> — ünïcode [["#);
    }
}
