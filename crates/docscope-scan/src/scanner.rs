//! Shallow documentation-directory scanner
//!
//! Walks a project tree looking for directories that contain markdown files
//! and reports one record per directory. The walk is shallow: once a
//! directory is found to hold markdown it is reported and its children are
//! not descended into, while sibling directories are scanned independently.
//! The project root itself is never reported and never blocks descent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::frontmatter::extract_front_matter;

/// Directories never descended into
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "venv",
    "env",
    "dist",
    "build",
    "target",
    "out",
    "vendor",
    "Pods",
];

/// Files marking a directory as a source tree rather than documentation
pub const PROJECT_INDICATORS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "setup.py",
    "pyproject.toml",
];

/// Markdown files that carry no classification signal on their own
const README_LIKE: &[&str] = &[
    "readme.md",
    "changelog.md",
    "contributing.md",
    "license.md",
    "code_of_conduct.md",
    "security.md",
];

/// Scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Scan root missing or not a directory
    #[error("scan root not found or not a directory: {path}")]
    NotFound {
        /// The offending root path
        path: PathBuf,
    },

    /// Generic I/O error during traversal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One documentation directory found by the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Directory path relative to the project root, forward slashes
    pub dir: String,
    /// Number of `.md` files directly inside
    pub md_count: usize,
    /// True when every markdown file is README-like
    pub readme_only: bool,
    /// `dir` split on `/`
    pub path_components: Vec<String>,
    /// `doc_type` front matter values found in the directory's markdown
    /// files, in lexicographic file order; `None` when no file carries one
    pub frontmatter_doc_types: Option<Vec<String>>,
}

/// The full scan report as emitted on stdout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Absolute project root that was scanned
    pub project_root: String,
    /// Records in depth-first, lexicographic order
    pub directories: Vec<ScanRecord>,
}

/// Documentation directory scanner
#[derive(Debug, Default)]
pub struct Scanner {
    skip_prefixes: Vec<String>,
}

impl Scanner {
    /// Create a scanner with default pruning only
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally prune directories matching these relative prefixes.
    /// A prefix matches a directory that equals it or lives under it.
    pub fn with_skip_prefixes(mut self, prefixes: impl IntoIterator<Item = String>) -> Self {
        self.skip_prefixes
            .extend(prefixes.into_iter().map(|p| p.trim_end_matches('/').to_string()));
        self
    }

    /// Walk the project tree and collect records.
    ///
    /// Output is depth-first, root-to-leaf, lexicographic at each level, so
    /// repeated runs over an unchanged tree produce identical reports.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScanRecord>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::NotFound {
                path: root.to_path_buf(),
            });
        }

        let mut records = Vec::new();
        self.walk(root, String::new(), &mut records)?;
        debug!(count = records.len(), root = %root.display(), "scan complete");
        Ok(records)
    }

    fn walk(
        &self,
        root: &Path,
        rel: String,
        out: &mut Vec<ScanRecord>,
    ) -> Result<(), ScanError> {
        let full = if rel.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&rel)
        };

        let mut subdirs: Vec<String> = Vec::new();
        let mut md_files: Vec<String> = Vec::new();
        let mut has_indicator = false;

        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            // file_type() does not follow symlinks, so symlinked
            // directories are dropped here and loops cannot form
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                subdirs.push(name);
            } else if file_type.is_file() {
                if PROJECT_INDICATORS.contains(&name.as_str()) {
                    has_indicator = true;
                }
                if name.ends_with(".md") {
                    md_files.push(name);
                }
            }
        }

        let is_root = rel.is_empty();
        if !is_root {
            if has_indicator {
                trace!(dir = %rel, "pruned: source tree indicator");
                return Ok(());
            }
            if self.is_skipped(&rel) {
                trace!(dir = %rel, "pruned: skip prefix");
                return Ok(());
            }
            if !md_files.is_empty() {
                md_files.sort();
                out.push(self.record(root, &rel, &md_files));
                // shallow scan: a markdown directory is a leaf
                return Ok(());
            }
        }

        subdirs.sort();
        for name in subdirs {
            if name.starts_with('.') || SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            let child = if is_root {
                name
            } else {
                format!("{rel}/{name}")
            };
            self.walk(root, child, out)?;
        }

        Ok(())
    }

    fn is_skipped(&self, rel: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|p| rel == p || rel.starts_with(&format!("{p}/")))
    }

    fn record(&self, root: &Path, rel: &str, md_files: &[String]) -> ScanRecord {
        let readme_only = md_files
            .iter()
            .all(|f| README_LIKE.contains(&f.to_lowercase().as_str()));

        let mut doc_types = Vec::new();
        for file in md_files {
            if let Some(fm) = extract_front_matter(&root.join(rel).join(file)) {
                if let Some(doc_type) = fm.get("doc_type") {
                    doc_types.push(doc_type.clone());
                }
            }
        }

        ScanRecord {
            dir: rel.to_string(),
            md_count: md_files.len(),
            readme_only,
            path_components: rel.split('/').map(String::from).collect(),
            frontmatter_doc_types: if doc_types.is_empty() {
                None
            } else {
                Some(doc_types)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn dirs_of(records: &[ScanRecord]) -> Vec<&str> {
        records.iter().map(|r| r.dir.as_str()).collect()
    }

    #[test]
    fn test_finds_markdown_directories() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        write_file(tmp.path(), "specs/req.md", "# Req");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["docs", "specs"]);
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Scanner::new().scan(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_hidden_and_skip_dirs_pruned() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), ".git/info.md", "internal");
        write_file(tmp.path(), "node_modules/pkg/README.md", "pkg");
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["docs"]);
    }

    #[test]
    fn test_project_indicator_prunes_source_trees() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "frontend/package.json", "{}");
        write_file(tmp.path(), "frontend/README.md", "# Frontend");
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["docs"]);
    }

    #[test]
    fn test_root_markdown_not_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "README.md", "# Root");
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["docs"]);
    }

    #[test]
    fn test_empty_project() {
        let tmp = tempfile::tempdir().unwrap();
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_md_count() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/a.md", "# A");
        write_file(tmp.path(), "docs/b.md", "# B");
        write_file(tmp.path(), "docs/c.md", "# C");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].md_count, 3);
    }

    #[test]
    fn test_shallow_scan_stops_at_markdown_dir() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "specs/overview.md", "# Overview");
        write_file(tmp.path(), "specs/login/requirements/req.md", "# Req");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        let dirs = dirs_of(&records);
        assert!(dirs.contains(&"specs"));
        assert!(!dirs.contains(&"specs/login/requirements"));
    }

    #[test]
    fn test_shallow_scan_siblings_independent() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "rules/coding/style.md", "# Style");
        write_file(tmp.path(), "rules/naming/names.md", "# Names");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["rules/coding", "rules/naming"]);
    }

    #[test]
    fn test_readme_only_flag() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/README.md", "# Readme");
        write_file(tmp.path(), "docs/CHANGELOG.md", "# Changes");
        write_file(tmp.path(), "specs/req.md", "# Req");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        let docs = records.iter().find(|r| r.dir == "docs").unwrap();
        let specs = records.iter().find(|r| r.dir == "specs").unwrap();
        assert!(docs.readme_only);
        assert!(!specs.readme_only);
    }

    #[test]
    fn test_readme_only_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/readme.md", "# Readme");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert!(records[0].readme_only);
    }

    #[test]
    fn test_frontmatter_doc_types_collected() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/r1.md", "---\ndoc_type: rule\n---\n# Rule 1");
        write_file(tmp.path(), "docs/r2.md", "---\ndoc_type: rule\n---\n# Rule 2");
        write_file(tmp.path(), "docs/plain.md", "# No front matter");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(
            records[0].frontmatter_doc_types,
            Some(vec!["rule".to_string(), "rule".to_string()])
        );
    }

    #[test]
    fn test_no_frontmatter_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(records[0].frontmatter_doc_types, None);
    }

    #[test]
    fn test_path_components() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "rules/coding/style.md", "# Style");
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(records[0].path_components, vec!["rules", "coding"]);
    }

    #[test]
    fn test_skip_prefixes() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        write_file(tmp.path(), "extra/notes/memo.md", "# Memo");

        let all = Scanner::new().scan(tmp.path()).unwrap();
        assert!(dirs_of(&all).contains(&"extra/notes"));

        let skipped = Scanner::new()
            .with_skip_prefixes(vec!["extra".to_string()])
            .scan(tmp.path())
            .unwrap();
        assert_eq!(dirs_of(&skipped), vec!["docs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_terminates() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "docs/sub/guide.md", "# Guide");
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("docs/parent")).unwrap();
        let records = Scanner::new().scan(tmp.path()).unwrap();
        assert_eq!(dirs_of(&records), vec!["docs/sub"]);
    }
}
