//! YAML front matter extraction
//!
//! Markdown documents may open with a `---` delimited YAML block carrying
//! metadata such as `doc_type`. Extraction is best-effort: any read or parse
//! problem yields `None` rather than an error, since front matter is only a
//! classification aid.

use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::trace;

/// Only the head of the file is inspected; front matter past this point is
/// not recognized.
const HEAD_LIMIT: usize = 4096;

fn frontmatter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*(\n[\s\S]*)?$").unwrap()
    })
}

/// Extract front matter from a markdown file as a flat string map.
///
/// Returns `None` when the file cannot be read, has no front matter block,
/// the block is unterminated, or its YAML does not parse. Nested values are
/// skipped; scalars are stringified.
pub fn extract_front_matter(path: &Path) -> Option<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).ok()?;
    let head = match content.char_indices().nth(HEAD_LIMIT) {
        Some((idx, _)) => &content[..idx],
        None => content.as_str(),
    };

    let captures = frontmatter_re().captures(head)?;
    let yaml_str = captures.get(1)?.as_str();

    let parsed: BTreeMap<String, Value> = match serde_yaml::from_str(yaml_str) {
        Ok(map) => map,
        Err(e) => {
            trace!(path = %path.display(), error = %e, "front matter is not valid YAML");
            return None;
        }
    };

    let mut result = BTreeMap::new();
    for (key, value) in parsed {
        if let Some(s) = scalar_to_string(&value) {
            result.insert(key, s);
        }
    }
    Some(result)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
