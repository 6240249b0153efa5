//! docscope Review - review context resolution
//!
//! Turns target hints (file paths, directories, feature names) and an
//! optional explicit review type into a [`ReviewReport`]: either a resolved
//! context with concrete target files, or the structured questions needed to
//! disambiguate.

pub mod detect;
pub mod report;
pub mod resolver;

pub use detect::{detect_type_from_dir, detect_type_from_path, doc_type_to_review_type};
pub use report::{Question, QuestionKey, ReviewReport, ReviewStatus, ReviewType};
pub use resolver::ReviewResolver;
