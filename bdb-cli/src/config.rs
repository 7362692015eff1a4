use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bdb_core::OptionsBuilder;
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "bdb-config.json";

/// Optional defaults read from JSON, e.g.
/// `{ "threads": 1, "size": 4, "no_elision": false }`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub threads: Option<usize>,
    /// Minimum reportable size in GiB
    pub size: Option<u64>,
    pub no_elision: Option<bool>,
}

impl FileConfig {
    pub fn into_builder(self) -> OptionsBuilder {
        OptionsBuilder {
            threads: self.threads,
            min_report_gib: self.size,
            elide: self.no_elision.map(|v| !v),
        }
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

pub fn parse(text: &str, path: &Path) -> Result<FileConfig> {
    serde_json::from_str(text).with_context(|| format!("bad config file {}", path.display()))
}

/// Loads `explicit` if given (it must exist), else `bdb-config.json` next to
/// the executable when present. No file means no overrides.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match exe_dir().map(|d| d.join(DEFAULT_CONFIG_NAME)) {
            Some(p) if p.is_file() => p,
            _ => return Ok(FileConfig::default()),
        },
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let cfg = parse(&text, &path)?;
    log::debug!("loaded config {}: {:?}", path.display(), cfg);
    Ok(cfg)
}
