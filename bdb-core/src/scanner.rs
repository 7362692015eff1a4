use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use log::trace;

use crate::{constants::sizes::BLOCK_SIZE, platform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
    /// Device nodes, FIFOs, sockets
    Other,
}

/// The subset of stat(2) the scanner needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryStat {
    pub kind: EntryKind,
    pub dev: u64,
    /// Allocated 512-byte blocks
    pub blocks: u64,
}

impl EntryStat {
    #[inline]
    pub fn allocated_bytes(&self) -> u64 {
        self.blocks.saturating_mul(BLOCK_SIZE)
    }
}

/// Abstraction over filesystem access to improve testability.
/// The default implementation delegates to platform backends.
pub trait FileSystemScanner: Send + Sync {
    /// Names of the direct children of `dir`, without `.` and `..`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;
    /// Status of `path` itself; symlinks are reported as such.
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryStat>;
    /// Status of `path` with symlinks resolved. Only used for the scan root.
    fn metadata(&self, path: &Path) -> io::Result<EntryStat>;
}

/// Default scanner that calls into OS-specific backends.
#[derive(Default, Clone, Copy)]
pub struct PlatformScanner;

impl FileSystemScanner for PlatformScanner {
    #[inline]
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        platform::read_dir_names(dir)
    }

    #[inline]
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryStat> {
        std::fs::symlink_metadata(path).map(|md| platform::entry_stat(&md))
    }

    #[inline]
    fn metadata(&self, path: &Path) -> io::Result<EntryStat> {
        std::fs::metadata(path).map(|md| platform::entry_stat(&md))
    }
}

#[inline]
pub fn platform_scanner() -> PlatformScanner {
    PlatformScanner
}

/// A child that survived [`list_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listed {
    Directory { name: OsString },
    File { name: OsString, bytes: u64 },
}

/// Lists the children of `dir` that live on `device`, keeping only
/// directories and regular files. Symlinks are never returned, whatever they
/// point at. Errors are absorbed: an unreadable directory lists as empty and
/// an entry that cannot be stat'ed is skipped.
pub fn list_entries(scanner: &dyn FileSystemScanner, dir: &Path, device: u64) -> Vec<Listed> {
    let names = match scanner.read_dir(dir) {
        Ok(names) => names,
        Err(e) => {
            trace!("skip unreadable dir {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if name == "." || name == ".." || name.is_empty() {
            continue;
        }
        let child: PathBuf = dir.join(&name);
        let st = match scanner.symlink_metadata(&child) {
            Ok(st) => st,
            Err(e) => {
                trace!("skip {}: {}", child.display(), e);
                continue;
            }
        };
        if st.dev != device {
            trace!("skip {}: on device {} (scan device {})", child.display(), st.dev, device);
            continue;
        }
        match st.kind {
            EntryKind::Directory => out.push(Listed::Directory { name }),
            EntryKind::RegularFile => out.push(Listed::File {
                name,
                bytes: st.allocated_bytes(),
            }),
            EntryKind::Symlink | EntryKind::Other => {}
        }
    }
    out
}
