//! Incoming-link index (backlinks) over the whole corpus.

use crate::corpus::{Corpus, KnownTargets};
use crate::wikilinks::extract_targets;
use std::collections::{BTreeMap, BTreeSet};

/// Map from target name (as written inside `[[...]]`) to the identities of
/// the notes that reference it
#[derive(Debug, Clone, Default)]
pub struct IncomingIndex {
    incoming: BTreeMap<String, BTreeSet<String>>,
}

impl IncomingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every note in the corpus and record one edge per distinct
    /// (target, source) pair.
    ///
    /// Targets are not checked against the corpus.
    pub fn build(corpus: &Corpus) -> Self {
        Self::build_with(corpus, &corpus.known_targets())
    }

    /// Like [`IncomingIndex::build`], reusing an existing identity lookup.
    ///
    /// Links are recognized exactly as [`crate::LinkResolver`] recognizes them,
    /// so every rendered link to a known identity has a matching backlink.
    pub fn build_with(corpus: &Corpus, known: &KnownTargets) -> Self {
        let mut index = Self::new();
        for note in corpus.notes() {
            let Some(text) = note.text() else {
                continue;
            };
            for target in extract_targets(text, known) {
                index.add_link(&note.identity, target);
            }
        }

        tracing::info!(
            "Indexed {} link targets ({} edges)",
            index.len(),
            index.edge_count()
        );
        index
    }

    /// Add a link from source to target
    pub fn add_link(&mut self, source: &str, target: &str) {
        self.incoming
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string());
    }

    /// Identities of the notes linking to `name`
    pub fn backlinks(&self, name: &str) -> impl Iterator<Item = &str> {
        self.incoming
            .get(name)
            .into_iter()
            .flat_map(|sources| sources.iter().map(String::as_str))
    }

    /// Number of distinct targets
    pub fn len(&self) -> usize {
        self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.incoming.values().map(BTreeSet::len).sum()
    }
}
