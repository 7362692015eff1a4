use std::{ffi::OsString, io, path::Path};

#[cfg(not(unix))]
mod portable_impl;
#[cfg(unix)]
mod unix_impl;

#[cfg(not(unix))]
pub use portable_impl::entry_stat;
#[cfg(unix)]
pub use unix_impl::entry_stat;

/// Directory listing shared by all platforms. `std::fs::read_dir` never yields
/// `.` or `..`; entries that fail mid-iteration are dropped.
pub fn read_dir_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let rd = std::fs::read_dir(dir)?;
    Ok(rd.filter_map(|e| e.ok()).map(|e| e.file_name()).collect())
}
