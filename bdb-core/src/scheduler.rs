use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    sync::Arc,
    thread::JoinHandle,
    time::Instant,
};

use crossbeam_deque::{Injector, Steal};
use log::debug;

use crate::{
    error_handling::{ScanError, ScanResult},
    scanner::{list_entries, EntryKind, FileSystemScanner, Listed},
    tree::SummaryNode,
    walker::walk,
    Options, ScanContext,
};

/// One top-level subdirectory of the scan root.
#[derive(Clone, Debug)]
pub struct Job {
    pub dir: PathBuf,
}

/// Drops trailing separators, except when the path is the filesystem root.
/// Works on the raw encoded bytes, so non-UTF-8 paths are trimmed too.
pub fn normalize_root(root: &Path) -> PathBuf {
    let bytes = root.as_os_str().as_encoded_bytes();
    let is_sep = |b: &u8| b.is_ascii() && std::path::is_separator(char::from(*b));
    let keep = match bytes.iter().rposition(|b| !is_sep(b)) {
        Some(i) => i + 1,
        // "/" or "//"
        None => bytes.len().min(1),
    };
    // SAFETY: only ASCII separators are cut off the end, so the split falls
    // right before a valid UTF-8 substring.
    let trimmed = unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[..keep]) };
    PathBuf::from(trimmed)
}

/// Spawns `n` threads through `spawn`. If one fails, the threads already
/// running are joined before the error is returned.
fn spawn_all<T>(
    n: usize,
    mut spawn: impl FnMut(usize) -> io::Result<JoinHandle<T>>,
) -> io::Result<Vec<JoinHandle<T>>> {
    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        match spawn(i) {
            Ok(h) => handles.push(h),
            Err(e) => {
                for h in handles {
                    let _ = h.join();
                }
                return Err(e);
            }
        }
    }
    Ok(handles)
}

pub(crate) fn run(
    root: &Path,
    opt: &Options,
    scanner: Arc<dyn FileSystemScanner>,
) -> ScanResult<SummaryNode> {
    let t0 = Instant::now();
    let root = normalize_root(root);
    let st = scanner
        .metadata(&root)
        .map_err(|source| ScanError::InvalidRoot {
            path: root.clone(),
            source,
        })?;
    if st.kind != EntryKind::Directory {
        return Err(ScanError::NotADirectory { path: root });
    }
    let device = st.dev;

    let mut tree = SummaryNode::new(root.clone());
    let injector: Arc<Injector<Job>> = Arc::new(Injector::new());
    let mut queued = 0usize;
    for entry in list_entries(scanner.as_ref(), &root, device) {
        match entry {
            Listed::File { bytes, .. } => tree.size += bytes,
            Listed::Directory { name } => {
                injector.push(Job {
                    dir: root.join(name),
                });
                queued += 1;
            }
        }
    }

    let threads = opt.threads.max(1);
    debug!(
        "scan {} (dev {}): {} top-level dirs, {} workers",
        root.display(),
        device,
        queued,
        threads
    );

    let handles = spawn_all(threads, |i| {
        let injector = injector.clone();
        let scanner = scanner.clone();
        std::thread::Builder::new()
            .name(format!("bdb-worker-{i}"))
            .spawn(move || {
                let ctx = ScanContext {
                    scanner: scanner.as_ref(),
                    device,
                };
                drain(&injector, &ctx)
            })
    })
    .map_err(|source| ScanError::Io {
        path: root.clone(),
        source,
    })?;

    // Sums and a set of children: the merge does not depend on finishing order.
    for h in handles {
        let walked = h.join().map_err(|_| ScanError::WorkerPanicked)?;
        for child in walked {
            tree.adopt(child);
        }
    }
    tree.children.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        "scan {} done in {:?}: {} bytes, {} nodes",
        root.display(),
        t0.elapsed(),
        tree.size,
        tree.node_count()
    );
    Ok(tree)
}

/// Pulls jobs until the queue is empty. Every walked top-level directory is
/// returned, however small.
fn drain(injector: &Injector<Job>, ctx: &ScanContext) -> Vec<SummaryNode> {
    let mut walked = Vec::new();
    loop {
        match injector.steal() {
            Steal::Success(Job { dir }) => walked.push(walk(ctx, &dir)),
            Steal::Retry => continue,
            Steal::Empty => break,
        }
    }
    walked
}
