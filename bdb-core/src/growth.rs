//! Compare two saved reports and list the directories that grew.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use ahash::AHashMap as HashMap;

use crate::error_handling::{ScanError, ScanResult};

/// A parsed report line; `gib` is the printed value, not bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub path: String,
    pub gib: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Growth {
    pub path: String,
    pub gib: f64,
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.path, self.gib)
    }
}

/// Parses report text. The last token of a line is the size; the tokens before
/// it, joined by single spaces, are the path. Blank lines are skipped.
/// On failure returns the 1-based number of the offending line.
pub fn parse_report(text: &str) -> Result<Vec<ReportEntry>, usize> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(last) = tokens.pop() else {
            continue;
        };
        let gib: f64 = last.parse().map_err(|_| i + 1)?;
        if tokens.is_empty() || !gib.is_finite() {
            return Err(i + 1);
        }
        out.push(ReportEntry {
            path: tokens.join(" "),
            gib,
        });
    }
    Ok(out)
}

pub fn read_report(path: impl AsRef<Path>) -> ScanResult<Vec<ReportEntry>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&text).map_err(|line| ScanError::MalformedReport {
        path: PathBuf::from(path),
        line,
    })
}

/// Paths of `newer` whose size grew relative to `older`, in `newer`'s order.
/// A path absent from `older` grew from zero. A path listed twice keeps its
/// last value.
pub fn growth(older: &[ReportEntry], newer: &[ReportEntry]) -> Vec<Growth> {
    let old: HashMap<&str, f64> = older.iter().map(|e| (e.path.as_str(), e.gib)).collect();
    let mut latest: HashMap<&str, f64> = HashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for e in newer {
        if latest.insert(e.path.as_str(), e.gib).is_none() {
            order.push(e.path.as_str());
        }
    }
    order
        .into_iter()
        .filter_map(|p| {
            let grown = latest[p] - old.get(p).copied().unwrap_or(0.0);
            (grown > 0.0).then(|| Growth {
                path: p.to_string(),
                gib: grown,
            })
        })
        .collect()
}
