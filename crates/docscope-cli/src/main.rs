mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use config::Settings;

#[derive(Parser)]
#[command(
    name = "docscope",
    version,
    about = "Documentation structure scanner and review context resolver"
)]
struct Cli {
    /// Project root; defaults to the nearest ancestor containing .git,
    /// falling back to the current directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Log level filter, overriding configuration
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a project tree for documentation directories
    Scan {
        /// Directory to scan instead of the project root
        root: Option<PathBuf>,

        /// Render a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,

        /// Comma-separated relative path prefixes to skip
        #[arg(long, value_delimiter = ',', value_name = "PREFIX")]
        skip: Vec<String>,
    },

    /// Query the declared documentation structure
    Query {
        /// Category to list the doc types of
        category: Option<String>,

        /// Doc type to show the stored entry of
        doc_type: Option<String>,

        /// Expand globs against the filesystem and apply excludes
        #[arg(long)]
        resolve: bool,
    },

    /// Resolve the review context for the given targets
    Review {
        /// Files, directories, or feature names
        targets: Vec<String>,

        /// Explicit review type (requirement, design, plan, code, generic)
        #[arg(long = "type", value_name = "TYPE")]
        review_type: Option<String>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let project_root = match &cli.root {
        Some(root) => root.clone(),
        None => config::find_project_root()?,
    };
    let settings = Settings::load(&project_root)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&settings.logging.level);
    docscope_logging::init_logging(level)?;

    match cli.command {
        Command::Scan {
            root,
            summary,
            skip,
        } => {
            let skip = if skip.is_empty() {
                settings.scan.skip.clone()
            } else {
                skip
            };
            commands::run_scan(&project_root, root.as_deref(), summary, skip)
        }
        Command::Query {
            category,
            doc_type,
            resolve,
        } => commands::run_query(
            &project_root,
            category.as_deref(),
            doc_type.as_deref(),
            resolve,
        ),
        Command::Review {
            targets,
            review_type,
        } => commands::run_review(&project_root, &targets, review_type.as_deref()),
    }
}
