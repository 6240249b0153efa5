//! Single-level glob expansion for declared path patterns
//!
//! A pattern may contain one `*` component which consumes exactly one path
//! component; `specs/*/requirements/` matches `specs/login/requirements/`
//! but never `specs/login/sub/requirements/`. Expansion enumerates the live
//! filesystem on every call; nothing is cached.

use std::fs;
use std::path::Path;

/// Expand a path pattern against the filesystem under `project_root`.
///
/// A literal pattern (no `*`) is returned verbatim without an existence
/// check: a missing directory simply yields no files later. A glob pattern
/// expands to the matching concrete directories in lexicographic order, or
/// to nothing when the wildcard level does not exist. Hidden directories are
/// never matched by the wildcard. Trailing `/` of the pattern is preserved
/// on every expansion.
pub fn expand_pattern(project_root: &Path, pattern: &str) -> Vec<String> {
    let trailing_slash = pattern.ends_with('/');
    let trimmed = pattern.trim_end_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();

    let Some(star) = parts.iter().position(|p| *p == "*") else {
        return vec![pattern.to_string()];
    };

    let prefix = parts[..star].join("/");
    let prefix_dir = if prefix.is_empty() {
        project_root.to_path_buf()
    } else {
        project_root.join(&prefix)
    };
    if !prefix_dir.is_dir() {
        return Vec::new();
    }
    let Ok(entries) = fs::read_dir(&prefix_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| !n.starts_with('.'))
        .collect();
    names.sort();

    let suffix = &parts[star + 1..];
    let mut expanded = Vec::new();
    for name in names {
        if !suffix.is_empty() {
            let mut check = prefix_dir.join(&name);
            for part in suffix {
                check.push(part);
            }
            if !check.is_dir() {
                continue;
            }
        }

        let mut resolved = String::new();
        if !prefix.is_empty() {
            resolved.push_str(&prefix);
            resolved.push('/');
        }
        resolved.push_str(&name);
        for part in suffix {
            resolved.push('/');
            resolved.push_str(part);
        }
        if trailing_slash {
            resolved.push('/');
        }
        expanded.push(resolved);
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mkdirs(root: &Path, rels: &[&str]) {
        for rel in rels {
            fs::create_dir_all(root.join(rel)).unwrap();
        }
    }

    #[test]
    fn test_literal_returned_verbatim_without_existence_check() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(
            expand_pattern(tmp.path(), "specs/requirements/"),
            vec!["specs/requirements/"]
        );
    }

    #[test]
    fn test_glob_expands_matching_directories() {
        let tmp = tempfile::tempdir().unwrap();
        mkdirs(
            tmp.path(),
            &["specs/login/requirements", "specs/auth/requirements"],
        );
        assert_eq!(
            expand_pattern(tmp.path(), "specs/*/requirements/"),
            vec!["specs/auth/requirements/", "specs/login/requirements/"]
        );
    }

    #[test]
    fn test_glob_is_single_level() {
        let tmp = tempfile::tempdir().unwrap();
        mkdirs(
            tmp.path(),
            &["specs/login/requirements", "specs/login/sub/requirements"],
        );
        assert_eq!(
            expand_pattern(tmp.path(), "specs/*/requirements/"),
            vec!["specs/login/requirements/"]
        );
    }

    #[test]
    fn test_glob_skips_entries_without_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        mkdirs(tmp.path(), &["specs/login/requirements", "specs/misc"]);
        assert_eq!(
            expand_pattern(tmp.path(), "specs/*/requirements/"),
            vec!["specs/login/requirements/"]
        );
    }

    #[test]
    fn test_glob_skips_hidden_directories() {
        let tmp = tempfile::tempdir().unwrap();
        mkdirs(
            tmp.path(),
            &["specs/login/requirements", "specs/.hidden/requirements"],
        );
        assert_eq!(
            expand_pattern(tmp.path(), "specs/*/requirements/"),
            vec!["specs/login/requirements/"]
        );
    }

    #[test]
    fn test_glob_matching_nothing_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(expand_pattern(tmp.path(), "specs/*/requirements/").is_empty());
    }

    #[test]
    fn test_no_trailing_slash_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        mkdirs(tmp.path(), &["specs/login/requirements"]);
        assert_eq!(
            expand_pattern(tmp.path(), "specs/*/requirements"),
            vec!["specs/login/requirements"]
        );
    }
}
