//! docscope Resolve - structural queries over `.doc_structure.yaml`
//!
//! Implements the four query shapes (List-all, List-types, List-paths,
//! Resolve-all) plus the single-level glob expansion and exclude filtering
//! they rely on. All queries are pure reads: the answer depends only on the
//! document and the current filesystem state.

pub mod glob;
pub mod resolver;

pub use glob::expand_pattern;
pub use resolver::{resolve_entry_at, RawListing, Resolver};
