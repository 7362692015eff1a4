use std::{borrow::Cow, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use bdb_core::ReportLine;
use serde::Serialize;

/// One exported report line.
#[derive(Serialize)]
struct Row<'a> {
    path: Cow<'a, str>,
    bytes: u64,
    gib: f64,
}

impl<'a> From<&'a ReportLine> for Row<'a> {
    fn from(l: &'a ReportLine) -> Self {
        Row {
            path: l.path.to_string_lossy(),
            bytes: l.bytes,
            gib: l.gib(),
        }
    }
}

pub fn write_csv(path: &Path, lines: &[ReportLine]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("cannot create {}", path.display()))?;
    wtr.write_record(["path", "bytes", "gib"])?;
    for l in lines {
        wtr.write_record([
            l.path.to_string_lossy().as_ref(),
            &l.bytes.to_string(),
            &format!("{:.1}", l.gib()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, lines: &[ReportLine]) -> Result<()> {
    let rows: Vec<Row> = lines.iter().map(Row::from).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    let mut file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
