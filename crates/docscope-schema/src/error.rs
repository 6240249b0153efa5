//! Error types for structure document operations

use std::path::PathBuf;
use thiserror::Error;

/// Structure document errors
#[derive(Debug, Error)]
pub enum StructureError {
    /// Structure document file missing from the project root
    #[error("document structure file not found: {path}")]
    NotFound {
        /// Expected file location
        path: PathBuf,
    },

    /// Document declares a major version this build does not support
    #[error("unsupported document structure version '{found}' (supported: {supported}.x)")]
    UnsupportedVersion {
        /// Version string from the document
        found: String,
        /// Major version this build understands
        supported: u64,
    },

    /// Queried category is not present in the document
    #[error("unknown category '{name}' (valid: {})", .valid.join(", "))]
    UnknownCategory {
        /// The offending category name
        name: String,
        /// Categories present in the document
        valid: Vec<String>,
    },

    /// Queried doc_type is not present in the category
    #[error("unknown doc_type '{name}' in category '{category}' (valid: {})", .valid.join(", "))]
    UnknownDocType {
        /// Category that was searched
        category: String,
        /// The offending doc_type name
        name: String,
        /// Doc types present in the category
        valid: Vec<String>,
    },

    /// Document failed to parse as YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, StructureError>;
