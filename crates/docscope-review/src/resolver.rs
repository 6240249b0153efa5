//! Review context resolution
//!
//! Given zero or more target hints and the structure document, decide the
//! review type and target files, or emit the structured questions needed to
//! decide. Ambiguity is always surfaced as a question, never guessed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use docscope_resolve::expand_pattern;
use docscope_schema::{is_excluded, StructureDocument, StructureError, STRUCTURE_FILE};

use crate::detect::{detect_type_from_dir, detect_type_from_path, doc_type_to_review_type};
use crate::report::{Question, QuestionKey, ReviewReport, ReviewStatus, ReviewType};

/// Resolves review contexts for one project
pub struct ReviewResolver {
    project_root: PathBuf,
    doc: Option<StructureDocument>,
    load_error: Option<String>,
}

impl ReviewResolver {
    /// Load the structure document from the project root. A missing or
    /// unreadable document is not fatal here; it surfaces as an error
    /// report from [`ReviewResolver::resolve`].
    pub fn load(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        match StructureDocument::load(&project_root) {
            Ok(doc) => Self {
                project_root,
                doc: Some(doc),
                load_error: None,
            },
            Err(StructureError::NotFound { .. }) => Self {
                project_root,
                doc: None,
                load_error: Some(format!(
                    "{STRUCTURE_FILE} not found; run the document structure \
                     initialization workflow to create it"
                )),
            },
            Err(e) => Self {
                project_root,
                doc: None,
                load_error: Some(e.to_string()),
            },
        }
    }

    /// Build a resolver around an already-parsed document
    pub fn with_document(project_root: impl Into<PathBuf>, doc: StructureDocument) -> Self {
        Self {
            project_root: project_root.into(),
            doc: Some(doc),
            load_error: None,
        }
    }

    /// Resolve the review context for the given target hints.
    ///
    /// An explicit review type short-circuits type inference but not target
    /// collection. The report's status is `needs_input` exactly when
    /// questions were produced.
    pub fn resolve(&self, targets: &[String], explicit: Option<ReviewType>) -> ReviewReport {
        let Some(doc) = &self.doc else {
            return ReviewReport::structure_error(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| format!("{STRUCTURE_FILE} could not be loaded")),
            );
        };

        let features = self.detect_features(doc);
        let mut report = ReviewReport {
            status: ReviewStatus::Resolved,
            has_doc_structure: true,
            review_type: explicit,
            target_files: Vec::new(),
            features: features.clone(),
            questions: Vec::new(),
            error: None,
        };

        match targets {
            [] => self.resolve_none(&features, &mut report),
            [single] => self.resolve_single(doc, single, &features, &mut report),
            many => self.resolve_many(doc, many, &mut report),
        }

        if !report.questions.is_empty() {
            report.status = ReviewStatus::NeedsInput;
        }
        debug!(status = ?report.status, targets = targets.len(), "review context resolved");
        report
    }

    /// Feature names bound by the `*` of the glob `specs` patterns, with
    /// excluded names dropped, sorted
    pub fn detect_features(&self, doc: &StructureDocument) -> Vec<String> {
        let mut features = BTreeSet::new();
        for entry in doc.specs.values() {
            for pattern in &entry.paths {
                let parts: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
                let Some(star) = parts.iter().position(|p| *p == "*") else {
                    continue;
                };
                for path in expand_pattern(&self.project_root, pattern) {
                    if is_excluded(&path, &entry.exclude) {
                        continue;
                    }
                    if let Some(name) = path.split('/').nth(star) {
                        features.insert(name.to_string());
                    }
                }
            }
        }
        features.into_iter().collect()
    }

    fn resolve_none(&self, features: &[String], report: &mut ReviewReport) {
        if report.review_type.is_none() {
            report.questions.push(Question::new(
                QuestionKey::Type,
                "Select the review type.",
                ReviewType::all_names(),
            ));
        } else if !features.is_empty() {
            report.questions.push(Question::new(
                QuestionKey::Feature,
                "Select the feature to review.",
                features.to_vec(),
            ));
        } else {
            report.questions.push(Question::new(
                QuestionKey::Target,
                "Specify the file or directory to review.",
                Vec::new(),
            ));
        }
    }

    fn resolve_single(
        &self,
        doc: &StructureDocument,
        target: &str,
        features: &[String],
        report: &mut ReviewReport,
    ) {
        let path = self.project_root.join(target);

        if path.is_file() {
            report.target_files = vec![target.to_string()];
            if report.review_type.is_none() {
                report.review_type = detect_type_from_path(target, doc);
                if report.review_type.is_none() {
                    report.questions.push(Question::new(
                        QuestionKey::Type,
                        format!("Cannot determine the review type of '{target}'. Select one."),
                        ReviewType::all_names(),
                    ));
                }
            }
        } else if path.is_dir() {
            let (detected, files) = detect_type_from_dir(target, doc, &self.project_root);
            report.target_files = files;
            if report.review_type.is_none() {
                report.review_type = detected;
            }
            if report.target_files.is_empty() {
                report.questions.push(Question::new(
                    QuestionKey::Target,
                    format!("No reviewable files found in directory '{target}'. Specify a path."),
                    Vec::new(),
                ));
            } else if report.review_type.is_none() {
                report.questions.push(Question::new(
                    QuestionKey::Type,
                    format!("Select the review type for directory '{target}'."),
                    ReviewType::all_names(),
                ));
            }
        } else if features.iter().any(|f| f == target) {
            self.resolve_feature(doc, target, report);
        } else {
            report.questions.push(Question::new(
                QuestionKey::Target,
                format!("'{target}' not found. Specify a file or directory to review."),
                Vec::new(),
            ));
        }
    }

    fn resolve_feature(&self, doc: &StructureDocument, feature: &str, report: &mut ReviewReport) {
        if let Some(review_type) = report.review_type {
            self.bind_feature_dirs(doc, feature, review_type, report);
            return;
        }

        let available = self.find_feature_subdirs(doc, feature);
        match available.as_slice() {
            [only] => {
                report.review_type = Some(*only);
                self.bind_feature_dirs(doc, feature, *only, report);
            }
            [] => {
                report.questions.push(Question::new(
                    QuestionKey::Target,
                    format!("Feature '{feature}' has no reviewable documents. Specify a path."),
                    Vec::new(),
                ));
            }
            many => {
                report.questions.push(Question::new(
                    QuestionKey::Type,
                    format!("Which aspect of feature '{feature}' should be reviewed?"),
                    many.iter().map(|t| t.as_str().to_string()).collect(),
                ));
            }
        }
    }

    fn resolve_many(&self, doc: &StructureDocument, targets: &[String], report: &mut ReviewReport) {
        let mut missing = Vec::new();
        for target in targets {
            if self.project_root.join(target).is_file() {
                report.target_files.push(target.clone());
            } else {
                missing.push(target.clone());
            }
        }

        if !missing.is_empty() {
            report.questions.push(Question::new(
                QuestionKey::Target,
                format!("Files not found: {}", missing.join(", ")),
                Vec::new(),
            ));
            return;
        }

        if report.review_type.is_none() {
            report.review_type = detect_type_from_path(&report.target_files[0], doc);
            if report.review_type.is_none() {
                report.questions.push(Question::new(
                    QuestionKey::Type,
                    "Cannot determine the review type. Select one.",
                    ReviewType::all_names(),
                ));
            }
        }
    }

    /// Doc types under which the feature has documents, in stable order
    pub fn find_feature_subdirs(&self, doc: &StructureDocument, feature: &str) -> Vec<ReviewType> {
        let mut available = Vec::new();
        for (doc_type, _) in doc.specs.iter() {
            let Some(review_type) = doc_type_to_review_type("specs", doc_type) else {
                continue;
            };
            if available.contains(&review_type) {
                continue;
            }
            if !self.find_feature_dirs(doc, feature, review_type).is_empty() {
                available.push(review_type);
            }
        }
        available
    }

    /// Concrete directories holding the feature's documents of one type
    pub fn find_feature_dirs(
        &self,
        doc: &StructureDocument,
        feature: &str,
        review_type: ReviewType,
    ) -> Vec<String> {
        let mut dirs = Vec::new();
        for (doc_type, entry) in doc.specs.iter() {
            if doc_type_to_review_type("specs", doc_type) != Some(review_type) {
                continue;
            }
            for pattern in &entry.paths {
                if !pattern.contains('*') {
                    continue;
                }
                let concrete = pattern.replacen('*', feature, 1);
                if is_excluded(&concrete, &entry.exclude) {
                    continue;
                }
                let dir = self.project_root.join(concrete.trim_end_matches('/'));
                if dir.is_dir()
                    && !self.collect_md_files(&dir).is_empty()
                    && !dirs.contains(&concrete)
                {
                    dirs.push(concrete);
                }
            }
        }
        dirs
    }

    fn bind_feature_dirs(
        &self,
        doc: &StructureDocument,
        feature: &str,
        review_type: ReviewType,
        report: &mut ReviewReport,
    ) {
        let dirs = self.find_feature_dirs(doc, feature, review_type);
        match dirs.as_slice() {
            [only] => {
                report.target_files =
                    self.collect_md_files(&self.project_root.join(only.trim_end_matches('/')));
            }
            [] => {
                report.questions.push(Question::new(
                    QuestionKey::Target,
                    format!(
                        "Feature '{feature}' has no {review_type} documents. Specify a path."
                    ),
                    Vec::new(),
                ));
            }
            many => {
                // ambiguous match: offer the candidate directories
                report.questions.push(Question::new(
                    QuestionKey::Target,
                    format!("Feature '{feature}' resolves to multiple directories. Pick one."),
                    many.to_vec(),
                ));
            }
        }
    }

    /// Markdown files under a directory, relative to the project root, sorted
    fn collect_md_files(&self, dir: &Path) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            })
            .filter_map(|e| crate::detect::rel_to_root(e.path(), &self.project_root))
            .collect();
        files.sort();
        files
    }
}
