use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub scan: ScanSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScanSettings {
    /// Relative path prefixes pruned on every scan
    pub skip: Vec<String>,
}

impl Settings {
    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Local override: <project root>/docscope.toml (optional)
    /// 3. Environment variables with DOCSCOPE__ prefix (highest priority)
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(project_root.join("docscope.toml")).required(false))
            .add_source(config::Environment::with_prefix("DOCSCOPE").separator("__"))
            .build()?;

        let settings: Self = config.try_deserialize()?;
        Ok(settings)
    }
}

/// Nearest ancestor of the working directory containing `.git`, falling back
/// to the working directory itself
pub fn find_project_root() -> anyhow::Result<PathBuf> {
    let cwd = env::current_dir()?;
    for dir in cwd.ancestors() {
        if dir.join(".git").exists() {
            return Ok(dir.to_path_buf());
        }
    }
    Ok(cwd)
}
