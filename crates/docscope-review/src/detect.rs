//! Review type detection from paths and directory contents

use std::path::Path;
use walkdir::WalkDir;

use docscope_schema::{is_excluded, StructureDocument};

use crate::report::ReviewType;

/// Source code extensions recognized for `code` reviews
pub const CODE_EXTENSIONS: &[&str] = &[
    "swift", "kt", "java", "ts", "tsx", "js", "jsx", "py", "go", "rs", "c", "cpp", "h", "m", "mm",
];

/// Base document path patterns that always map to `generic`
const GENERIC_BASE_PATTERNS: &[&str] = &[".claude/skills/", ".claude/commands/"];

/// Root-level files that map to `generic`
const GENERIC_ROOT_FILES: &[&str] = &["CLAUDE.md", "README.md"];

/// True when the file path lies under the declared pattern.
///
/// Componentwise comparison; `*` in the pattern matches any single
/// component. The path may extend past the pattern (it names a file inside
/// the declared directory).
pub fn path_matches_pattern(path: &str, pattern: &str) -> bool {
    let normalized = path.replace('\\', "/");
    let pattern_parts: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
    let path_parts: Vec<&str> = normalized.split('/').collect();

    if path_parts.len() < pattern_parts.len() {
        return false;
    }
    pattern_parts
        .iter()
        .zip(&path_parts)
        .all(|(p, c)| *p == "*" || p == c)
}

/// Map a category + doc_type to a review type.
///
/// `specs.requirement/design/plan` review as themselves; any other `specs`
/// type and everything under `rules` reviews as `generic`.
pub fn doc_type_to_review_type(category: &str, doc_type: &str) -> Option<ReviewType> {
    match category {
        "specs" => Some(match doc_type {
            "requirement" => ReviewType::Requirement,
            "design" => ReviewType::Design,
            "plan" => ReviewType::Plan,
            _ => ReviewType::Generic,
        }),
        "rules" => Some(ReviewType::Generic),
        _ => None,
    }
}

/// Detect the review type of a file path from the declared structure.
///
/// Excluded paths never match their entry, so an archived requirement falls
/// through to the later detection stages.
pub fn detect_type_from_document(path: &str, doc: &StructureDocument) -> Option<ReviewType> {
    for (category, map) in doc.categories() {
        for (doc_type, entry) in map {
            for declared in &entry.paths {
                if path_matches_pattern(path, declared) && !is_excluded(path, &entry.exclude) {
                    return doc_type_to_review_type(category, doc_type);
                }
            }
        }
    }
    None
}

/// Detect `generic` from base document patterns and non-excluded rules paths
pub fn detect_generic(path: &str, doc: Option<&StructureDocument>) -> Option<ReviewType> {
    let rules_entries: Vec<(Vec<String>, Vec<String>)> = match doc {
        Some(doc) => doc
            .rules
            .values()
            .map(|e| (e.paths.clone(), e.exclude.clone()))
            .collect(),
        // no structure document: fall back to the conventional rules/ root
        None => vec![(vec!["rules/".to_string()], Vec::new())],
    };

    for (paths, exclude) in &rules_entries {
        for declared in paths {
            if pattern_prefix_matches(path, declared) && !is_excluded(path, exclude) {
                return Some(ReviewType::Generic);
            }
        }
    }

    for declared in GENERIC_BASE_PATTERNS {
        if pattern_prefix_matches(path, declared) {
            return Some(ReviewType::Generic);
        }
    }

    let name = Path::new(path).file_name().and_then(|n| n.to_str());
    if let Some(name) = name {
        if GENERIC_ROOT_FILES.contains(&name) && !path.trim_end_matches('/').contains('/') {
            return Some(ReviewType::Generic);
        }
    }
    None
}

fn pattern_prefix_matches(path: &str, pattern: &str) -> bool {
    path.starts_with(pattern) || path.contains(&format!("/{pattern}"))
}

/// Full path type detection: code extension, then the declared structure,
/// then base document patterns
pub fn detect_type_from_path(path: &str, doc: &StructureDocument) -> Option<ReviewType> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    if let Some(ext) = ext {
        if CODE_EXTENSIONS.contains(&ext.as_str()) {
            return Some(ReviewType::Code);
        }
    }

    if let Some(t) = detect_type_from_document(path, doc) {
        return Some(t);
    }
    detect_generic(path, Some(doc))
}

/// Detect the review type of a directory from its contents.
///
/// Code files win over markdown (a `src/` with a README is still a code
/// review); otherwise the type comes from the first markdown file. Returns
/// the collected files relative to the project root, sorted.
pub fn detect_type_from_dir(
    rel_dir: &str,
    doc: &StructureDocument,
    project_root: &Path,
) -> (Option<ReviewType>, Vec<String>) {
    let dir = project_root.join(rel_dir);
    if !dir.is_dir() {
        return (None, Vec::new());
    }

    let mut code_files = Vec::new();
    let mut md_files = Vec::new();
    for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(rel) = rel_to_root(entry.path(), project_root) else {
            continue;
        };
        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some(ext) if CODE_EXTENSIONS.contains(&ext) => code_files.push(rel),
            Some("md") => md_files.push(rel),
            _ => {}
        }
    }
    code_files.sort();
    md_files.sort();

    if !code_files.is_empty() {
        (Some(ReviewType::Code), code_files)
    } else if !md_files.is_empty() {
        let review_type = detect_type_from_path(&md_files[0], doc);
        (review_type, md_files)
    } else {
        (None, Vec::new())
    }
}

/// Path relative to the project root, forward slashes
pub fn rel_to_root(path: &Path, project_root: &Path) -> Option<String> {
    let rel = path.strip_prefix(project_root).ok()?;
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(component.as_os_str().to_str()?);
    }
    Some(out)
}
