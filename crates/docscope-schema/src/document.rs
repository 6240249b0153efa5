//! The `.doc_structure.yaml` document model
//!
//! A project declares where its documentation lives in a single YAML file at
//! the project root. Two fixed categories exist: `rules` (process and
//! convention documents) and `specs` (product definition documents). Each
//! category maps doc_type names to path patterns.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, StructureError};

/// File name of the structure document, relative to the project root
pub const STRUCTURE_FILE: &str = ".doc_structure.yaml";

/// Major version this build understands
pub const SUPPORTED_MAJOR: u64 = 1;

/// One doc_type declaration: where documents of this type live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTypeEntry {
    /// Path patterns relative to the project root. Each may contain one
    /// single-level `*` wildcard.
    pub paths: Vec<String>,

    /// Directory names to drop from resolution. A path is excluded when any
    /// of its components equals an entry exactly (case-sensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Free-text note, no semantic effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Mapping of doc_type name to its declaration
pub type CategoryMap = BTreeMap<String, DocTypeEntry>;

/// The parsed `.doc_structure.yaml` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDocument {
    /// Semantic version of the document format
    pub version: String,

    /// Product definition documents (requirement, design, plan, ...)
    #[serde(
        default,
        deserialize_with = "category_or_null",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub specs: CategoryMap,

    /// Process and convention documents (rule, workflow, ...)
    #[serde(
        default,
        deserialize_with = "category_or_null",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub rules: CategoryMap,
}

/// A bare `specs:` or `rules:` key deserializes as null; treat it as empty.
fn category_or_null<'de, D>(deserializer: D) -> std::result::Result<CategoryMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CategoryMap>::deserialize(deserializer)?.unwrap_or_default())
}

impl StructureDocument {
    /// Load and validate the structure document from a project root.
    ///
    /// Fails with [`StructureError::NotFound`] when the file is absent; the
    /// caller decides how to recover (typically by prompting the user).
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(STRUCTURE_FILE);
        if !path.is_file() {
            return Err(StructureError::NotFound { path });
        }

        let text = fs::read_to_string(&path)?;
        let doc = Self::parse(&text)?;
        debug!(
            specs = doc.specs.len(),
            rules = doc.rules.len(),
            version = %doc.version,
            "loaded structure document"
        );
        Ok(doc)
    }

    /// Parse document text and enforce the version gate.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: Self = serde_yaml::from_str(text)?;

        let major = doc
            .version
            .split('.')
            .next()
            .and_then(|s| s.trim().parse::<u64>().ok());
        if major != Some(SUPPORTED_MAJOR) {
            return Err(StructureError::UnsupportedVersion {
                found: doc.version,
                supported: SUPPORTED_MAJOR,
            });
        }

        Ok(doc)
    }

    /// Names of the non-empty categories, in stable order.
    pub fn category_names(&self) -> Vec<String> {
        self.categories().map(|(name, _)| name.to_string()).collect()
    }

    /// Iterate non-empty categories in stable order (`rules` before `specs`).
    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &CategoryMap)> {
        [("rules", &self.rules), ("specs", &self.specs)]
            .into_iter()
            .filter(|(_, map)| !map.is_empty())
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Result<&CategoryMap> {
        match name {
            "rules" if !self.rules.is_empty() => Ok(&self.rules),
            "specs" if !self.specs.is_empty() => Ok(&self.specs),
            _ => Err(StructureError::UnknownCategory {
                name: name.to_string(),
                valid: self.category_names(),
            }),
        }
    }

    /// Look up a doc_type entry within a category.
    pub fn entry(&self, category: &str, doc_type: &str) -> Result<&DocTypeEntry> {
        let map = self.category(category)?;
        map.get(doc_type).ok_or_else(|| StructureError::UnknownDocType {
            category: category.to_string(),
            name: doc_type.to_string(),
            valid: map.keys().cloned().collect(),
        })
    }
}

/// True when any path component equals one of the excluded names.
///
/// Matching is exact and case-sensitive: `archived_v2` does not match an
/// `archived` exclude entry. Both `/` and `\` separators are understood.
pub fn is_excluded(path: &str, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    path.split(['/', '\\'])
        .any(|component| exclude.iter().any(|e| e == component))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML_WITH_EXCLUDE: &str = r#"
version: "1.0"

specs:
  requirement:
    paths: ["specs/*/requirements/"]
    exclude: ["archived", "_template"]
  design:
    paths: ["specs/*/design/"]
    exclude:
      - archived

rules:
  rule:
    paths: [rules/]
"#;

    #[test]
    fn test_parse_exclude_flow_and_block() {
        let doc = StructureDocument::parse(YAML_WITH_EXCLUDE).unwrap();
        assert_eq!(
            doc.specs["requirement"].exclude,
            vec!["archived", "_template"]
        );
        assert_eq!(doc.specs["design"].exclude, vec!["archived"]);
        assert!(doc.rules["rule"].exclude.is_empty());
    }

    #[test]
    fn test_parse_paths_and_description() {
        let doc = StructureDocument::parse(
            "version: \"1.0\"\nspecs:\n  design:\n    paths: [specs/design/]\n    description: \"design docs\"\n",
        )
        .unwrap();
        assert_eq!(doc.specs["design"].paths, vec!["specs/design/"]);
        assert_eq!(doc.specs["design"].description.as_deref(), Some("design docs"));
    }

    #[test]
    fn test_version_gate() {
        let err = StructureDocument::parse("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, StructureError::UnsupportedVersion { .. }));

        // bare major is accepted
        assert!(StructureDocument::parse("version: \"1\"\n").is_ok());
    }

    #[test]
    fn test_missing_version_is_parse_error() {
        let err =
            StructureDocument::parse("specs:\n  requirement:\n    paths: [specs/]\n").unwrap_err();
        assert!(matches!(err, StructureError::Yaml(_)));
    }

    #[test]
    fn test_empty_document_has_no_categories() {
        let doc = StructureDocument::parse("version: \"1.0\"\n").unwrap();
        assert!(doc.category_names().is_empty());
        assert_eq!(doc.categories().count(), 0);
    }

    #[test]
    fn test_bare_category_key_is_empty() {
        let doc = StructureDocument::parse("version: \"1.0\"\nrules:\n").unwrap();
        assert!(doc.rules.is_empty());
        assert!(doc.category_names().is_empty());
    }

    #[test]
    fn test_unknown_category_lists_valid() {
        let doc = StructureDocument::parse(YAML_WITH_EXCLUDE).unwrap();
        let err = doc.category("bogus").unwrap_err();
        match err {
            StructureError::UnknownCategory { name, valid } => {
                assert_eq!(name, "bogus");
                assert_eq!(valid, vec!["rules", "specs"]);
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_doc_type_lists_valid() {
        let doc = StructureDocument::parse(YAML_WITH_EXCLUDE).unwrap();
        let err = doc.entry("specs", "plan").unwrap_err();
        match err {
            StructureError::UnknownDocType { category, name, valid } => {
                assert_eq!(category, "specs");
                assert_eq!(name, "plan");
                assert_eq!(valid, vec!["design", "requirement"]);
            }
            other => panic!("expected UnknownDocType, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_round_trip_identity() {
        let doc = StructureDocument::parse(YAML_WITH_EXCLUDE).unwrap();
        let entry = doc.entry("specs", "requirement").unwrap();
        assert_eq!(entry.paths, vec!["specs/*/requirements/"]);
        assert_eq!(entry.exclude, vec!["archived", "_template"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StructureDocument::load(dir.path()).unwrap_err();
        assert!(matches!(err, StructureError::NotFound { .. }));
    }

    #[test]
    fn test_load_from_project_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STRUCTURE_FILE), YAML_WITH_EXCLUDE).unwrap();
        let doc = StructureDocument::load(dir.path()).unwrap();
        assert_eq!(doc.version, "1.0");
    }

    #[test]
    fn test_is_excluded_component_equality() {
        let exclude = vec!["archived".to_string(), "_template".to_string()];
        assert!(is_excluded("specs/archived/requirements/req.md", &exclude));
        assert!(is_excluded("specs/_template/requirements/req.md", &exclude));
        assert!(is_excluded("a/b/c/archived/d/e.md", &exclude));
        assert!(!is_excluded("specs/login/requirements/req.md", &exclude));
        // partial names never match
        assert!(!is_excluded("specs/archived_v2/requirements/req.md", &exclude));
        assert!(!is_excluded("specs/archived/req.md", &[]));
        // backslash separators are understood
        assert!(is_excluded("specs\\archived\\req.md", &exclude));
    }
}
