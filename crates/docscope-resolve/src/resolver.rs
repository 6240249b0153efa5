//! Structure resolver: the four query shapes over a loaded document
//!
//! Queries never mutate the document; Resolve-all re-walks the filesystem on
//! every call, so the same document and tree always produce the same answer.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use docscope_schema::{is_excluded, DocTypeEntry, Result, StructureDocument};

use crate::glob::expand_pattern;

/// Raw (unresolved) category listing: category → doc_type → declared paths
pub type RawListing = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Answers structural queries against one project's structure document
pub struct Resolver {
    project_root: PathBuf,
    doc: StructureDocument,
}

impl Resolver {
    /// Build a resolver for a document loaded from `project_root`
    pub fn new(project_root: impl Into<PathBuf>, doc: StructureDocument) -> Self {
        Self {
            project_root: project_root.into(),
            doc,
        }
    }

    /// The document this resolver answers for
    pub fn document(&self) -> &StructureDocument {
        &self.doc
    }

    /// List-all: every non-empty category with its raw declared paths.
    /// An empty document yields an empty mapping, not an error.
    pub fn list_all(&self) -> RawListing {
        self.doc
            .categories()
            .map(|(name, map)| (name.to_string(), raw_types(map)))
            .collect()
    }

    /// List-types: doc_type → declared paths for one category
    pub fn list_types(&self, category: &str) -> Result<BTreeMap<String, Vec<String>>> {
        Ok(raw_types(self.doc.category(category)?))
    }

    /// List-paths: the stored entry for one category + doc_type, unmodified
    pub fn list_paths(&self, category: &str, doc_type: &str) -> Result<&DocTypeEntry> {
        self.doc.entry(category, doc_type)
    }

    /// Resolve-all: expand every entry's globs against the live filesystem
    /// and apply its exclude filter
    pub fn resolve_all(&self) -> RawListing {
        let mut listing = RawListing::new();
        for (category, map) in self.doc.categories() {
            let resolved: BTreeMap<String, Vec<String>> = map
                .iter()
                .map(|(doc_type, entry)| (doc_type.clone(), self.resolve_entry(entry)))
                .collect();
            listing.insert(category.to_string(), resolved);
        }
        debug!(categories = listing.len(), "resolved structure document");
        listing
    }

    /// Resolve one entry: glob expansion, exclude filter, dedup.
    ///
    /// Expansion order is first-seen: declared pattern order, each glob
    /// expanded lexicographically. Duplicates are detected on the path with
    /// its trailing slash trimmed.
    pub fn resolve_entry(&self, entry: &DocTypeEntry) -> Vec<String> {
        resolve_entry_at(&self.project_root, entry)
    }

    /// Project root the globs expand against
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

fn raw_types(map: &docscope_schema::CategoryMap) -> BTreeMap<String, Vec<String>> {
    map.iter()
        .map(|(doc_type, entry)| (doc_type.clone(), entry.paths.clone()))
        .collect()
}

/// Standalone entry resolution, shared with the review resolver
pub fn resolve_entry_at(project_root: &Path, entry: &DocTypeEntry) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for pattern in &entry.paths {
        for path in expand_pattern(project_root, pattern) {
            if is_excluded(&path, &entry.exclude) {
                continue;
            }
            if seen.insert(path.trim_end_matches('/').to_string()) {
                resolved.push(path);
            }
        }
    }
    resolved
}
