//! Subcommand runners
//!
//! Each runner prints its result on stdout (JSON unless a summary mode was
//! asked for) and returns the process exit code. Logs go to stderr.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use docscope_resolve::Resolver;
use docscope_review::{ReviewResolver, ReviewStatus, ReviewType};
use docscope_scan::{ScanReport, Scanner};
use docscope_schema::StructureDocument;

pub fn run_scan(
    project_root: &Path,
    scan_root: Option<&Path>,
    summary: bool,
    skip: Vec<String>,
) -> Result<ExitCode> {
    let root = match scan_root {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => project_root.join(p),
        None => project_root.to_path_buf(),
    };

    let directories = Scanner::new().with_skip_prefixes(skip).scan(&root)?;
    info!(count = directories.len(), "scan finished");

    let report = ScanReport {
        project_root: root.display().to_string(),
        directories,
    };
    if summary {
        print_scan_summary(&report);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_scan_summary(report: &ScanReport) {
    println!("Documentation directories under {}:", report.project_root);
    for record in &report.directories {
        let mut notes = Vec::new();
        if record.readme_only {
            notes.push("readme-only".to_string());
        }
        if let Some(types) = &record.frontmatter_doc_types {
            notes.push(format!("doc_type: {}", types.join(", ")));
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join("; "))
        };
        println!("  {} ({} md){}", record.dir, record.md_count, notes);
    }
    println!("{} directories", report.directories.len());
}

pub fn run_query(
    project_root: &Path,
    category: Option<&str>,
    doc_type: Option<&str>,
    resolve: bool,
) -> Result<ExitCode> {
    let doc = StructureDocument::load(project_root)?;
    let resolver = Resolver::new(project_root, doc);

    let value = if resolve {
        serde_json::to_value(resolver.resolve_all())?
    } else {
        match (category, doc_type) {
            (None, _) => serde_json::to_value(resolver.list_all())?,
            (Some(category), None) => serde_json::to_value(resolver.list_types(category)?)?,
            (Some(category), Some(doc_type)) => {
                serde_json::to_value(resolver.list_paths(category, doc_type)?)?
            }
        }
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(ExitCode::SUCCESS)
}

pub fn run_review(
    project_root: &Path,
    targets: &[String],
    review_type: Option<&str>,
) -> Result<ExitCode> {
    let explicit: Option<ReviewType> = match review_type {
        Some(raw) => Some(raw.parse().map_err(anyhow::Error::msg)?),
        None => None,
    };

    let report = ReviewResolver::load(project_root).resolve(targets, explicit);
    println!("{}", serde_json::to_string_pretty(&report)?);

    // needs_input is a normal outcome; only a load failure is an error
    Ok(if report.status == ReviewStatus::Error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
