//! docscope Scan - documentation directory discovery
//!
//! Shallow project-tree scanner that locates markdown directories and emits
//! one [`ScanRecord`] per directory, plus the front matter extractor the
//! records draw their `doc_type` hints from. Records are transient: the scan
//! output seeds the human-curated `.doc_structure.yaml` and is never
//! persisted.

pub mod frontmatter;
pub mod scanner;

pub use frontmatter::extract_front_matter;
pub use scanner::{ScanError, ScanRecord, ScanReport, Scanner, PROJECT_INDICATORS, SKIP_DIRS};
