//! Corpus discovery: walking the source tree and loading allow-listed files.

use crate::error::BuildError;
use crate::slug::{slugify, strip_extension};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// How a corpus entry is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Parsed for wikilinks, rendered and templated
    Note,
    /// Copied through verbatim
    Image,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Note => "note",
            AssetKind::Image => "image",
        }
    }
}

/// Extension allow-list mapping file extensions to asset kinds
#[derive(Debug, Clone)]
pub struct ExtensionPolicy {
    kinds: HashMap<String, AssetKind>,
}

impl ExtensionPolicy {
    /// A policy that accepts nothing
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Only `.md` notes, no assets
    pub fn notes_only() -> Self {
        let mut policy = Self::empty();
        policy.allow("md", AssetKind::Note);
        policy
    }

    /// Accept files with `ext` (leading dot optional) as `kind`
    pub fn allow(&mut self, ext: &str, kind: AssetKind) -> &mut Self {
        self.kinds
            .insert(ext.trim_start_matches('.').to_string(), kind);
        self
    }

    pub fn kind_of(&self, ext: &str) -> Option<AssetKind> {
        self.kinds.get(ext).copied()
    }

    fn kind_of_path(&self, path: &str) -> Option<AssetKind> {
        let file = path.rsplit('/').next().unwrap_or(path);
        match file.rfind('.') {
            Some(0) | None => None,
            Some(dot) => self.kind_of(&file[dot + 1..]),
        }
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        crate::config::Config::default().extension_policy()
    }
}

/// File content, decoded according to the entry's kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

/// A single allow-listed file from the source tree
#[derive(Debug, Clone)]
pub struct Entry {
    /// Root-relative path with `/` separators, extension kept
    pub rel_path: String,
    /// Relative path with the extension stripped; the wikilink join key
    pub identity: String,
    pub kind: AssetKind,
    pub content: Content,
}

impl Entry {
    fn new(rel_path: String, kind: AssetKind, bytes: Vec<u8>) -> Self {
        let identity = strip_extension(&rel_path).to_string();
        let content = match kind {
            AssetKind::Note => match String::from_utf8(bytes) {
                Ok(text) => Content::Text(text),
                Err(err) => {
                    tracing::warn!("{} is not valid UTF-8; decoding lossily", rel_path);
                    Content::Text(String::from_utf8_lossy(err.as_bytes()).into_owned())
                }
            },
            AssetKind::Image => Content::Binary(bytes),
        };
        Self {
            rel_path,
            identity,
            kind,
            content,
        }
    }

    /// File name without directories or extension
    pub fn title(&self) -> &str {
        self.identity.rsplit('/').next().unwrap_or(&self.identity)
    }

    /// Raw text of a note (`None` for binary assets)
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.content {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    /// Path of this entry inside the output tree
    pub fn output_rel_path(&self) -> String {
        match self.kind {
            AssetKind::Note => crate::slug::html_path(&self.rel_path),
            AssetKind::Image => slugify(&self.rel_path),
        }
    }

    /// Relative href other pages use to link here
    pub fn href(&self) -> String {
        format!("./{}", self.output_rel_path())
    }
}

/// All allow-listed files of one run, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: BTreeMap<String, Entry>,
}

impl Corpus {
    /// Walk `root` and load every file the policy accepts.
    ///
    /// Any walk or read failure aborts the load; no partial corpus is returned.
    pub fn load(root: &Path, policy: &ExtensionPolicy) -> Result<Self, BuildError> {
        let mut corpus = Corpus::default();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| BuildError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            // Links are not descended into, but a link to a file is read through
            let is_file = if entry.path_is_symlink() {
                fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                tracing::debug!("Skipping {:?} (not a regular file)", entry.path());
                continue;
            }

            let rel_path = relative_path(root, entry.path())?;
            let Some(kind) = policy.kind_of_path(&rel_path) else {
                tracing::debug!("Skipping {} (extension not allow-listed)", rel_path);
                continue;
            };

            let bytes = fs::read(entry.path()).map_err(|source| BuildError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            corpus.insert(Entry::new(rel_path, kind, bytes));
        }

        tracing::info!(
            "Found {} notes and {} assets in {:?}",
            corpus.notes().count(),
            corpus.assets().count(),
            root
        );

        Ok(corpus)
    }

    /// Build a corpus from in-memory `(relative path, content)` pairs
    pub fn from_memory<I, P, C>(files: I, policy: &ExtensionPolicy) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        let mut corpus = Corpus::default();
        for (path, content) in files {
            let rel_path = path.into().trim_start_matches('/').to_string();
            if let Some(kind) = policy.kind_of_path(&rel_path) {
                corpus.insert(Entry::new(rel_path, kind, content.into()));
            }
        }
        corpus
    }

    fn insert(&mut self, entry: Entry) {
        tracing::debug!("Loaded {} {}", entry.kind.as_str(), entry.rel_path);
        if let Some(previous) = self.entries.insert(entry.rel_path.clone(), entry) {
            tracing::warn!("Duplicate path {}; keeping the last one", previous.rel_path);
        }
    }

    pub fn get(&self, rel_path: &str) -> Option<&Entry> {
        self.entries.get(rel_path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn notes(&self) -> impl Iterator<Item = &Entry> {
        self.entries().filter(|e| e.kind == AssetKind::Note)
    }

    pub fn assets(&self) -> impl Iterator<Item = &Entry> {
        self.entries().filter(|e| e.kind != AssetKind::Note)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identity → href lookup used to resolve wikilinks.
    ///
    /// Note identities shadow asset identities. Within a kind the last entry
    /// in path order wins.
    pub fn known_targets(&self) -> KnownTargets {
        let mut hrefs: HashMap<String, String> = HashMap::new();

        for entry in self.assets().chain(self.notes()) {
            if let Some(previous) = hrefs.insert(entry.identity.clone(), entry.href()) {
                tracing::warn!(
                    "Duplicate identity '{}': {} replaces {}",
                    entry.identity,
                    entry.href(),
                    previous
                );
            }
        }

        KnownTargets { hrefs }
    }
}

/// Known identities and the hrefs they resolve to
#[derive(Debug, Clone, Default)]
pub struct KnownTargets {
    hrefs: HashMap<String, String>,
}

impl KnownTargets {
    pub fn href(&self, identity: &str) -> Option<&str> {
        self.hrefs.get(identity).map(String::as_str)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.hrefs.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.hrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hrefs.is_empty()
    }
}

/// Root-relative, `/`-separated form of `path`
fn relative_path(root: &Path, path: &Path) -> Result<String, BuildError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    // A file passed directly as the root is its own corpus
    let rel: PathBuf = if rel.as_os_str().is_empty() {
        path.file_name().map(PathBuf::from).unwrap_or_default()
    } else {
        rel.to_path_buf()
    };

    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| BuildError::NonUtf8Path(path.to_path_buf()))?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
