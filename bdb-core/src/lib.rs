#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::{path::Path, sync::Arc};

pub mod constants;
mod error_handling;
pub mod growth;
#[cfg(test)]
mod mock;
mod options;
mod platform;
pub mod report;
mod scanner;
mod scheduler;
mod tree;
mod walker;

pub use error_handling::{ScanError, ScanResult};
pub use options::{Options, OptionsBuilder};
pub use report::{render, render_with, ReportLine};
pub use scanner::{
    list_entries, platform_scanner, EntryKind, EntryStat, FileSystemScanner, Listed,
    PlatformScanner,
};
pub use scheduler::{normalize_root, Job};
pub use tree::SummaryNode;
pub use walker::walk;

/// Per-scan state handed to the walker: the filesystem backend and the device
/// every visited entry must live on.
#[derive(Clone, Copy)]
pub struct ScanContext<'a> {
    pub scanner: &'a dyn FileSystemScanner,
    pub device: u64,
}

/// Scans `root` with `opt.threads` workers and returns its summary tree.
///
/// Fails only if `root` cannot be stat'ed or is not a directory; everything
/// unreadable below it is silently left out.
pub fn scan_directory(root: impl AsRef<Path>, opt: &Options) -> ScanResult<SummaryNode> {
    let scanner = Arc::new(crate::scanner::platform_scanner());
    scan_directory_with(root, opt, scanner)
}

/// Variant of scan_directory that accepts a custom scanner implementation.
/// Useful for unit tests and alternative backends.
pub fn scan_directory_with(
    root: impl AsRef<Path>,
    opt: &Options,
    scanner: Arc<dyn FileSystemScanner>,
) -> ScanResult<SummaryNode> {
    scheduler::run(root.as_ref(), opt, scanner)
}
