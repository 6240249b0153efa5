//! docscope Schema - the `.doc_structure.yaml` document model
//!
//! This crate defines the structure document that describes where a project
//! keeps its documentation, the loader with its version gate, and the shared
//! error taxonomy used by the resolver and review crates.

pub mod document;
pub mod error;

pub use document::{is_excluded, CategoryMap, DocTypeEntry, StructureDocument, STRUCTURE_FILE};
pub use error::{Result, StructureError};
