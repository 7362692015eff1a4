//! In-memory filesystem for unit tests.

use std::{
    collections::{BTreeMap, HashSet},
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use crate::{
    constants::sizes::BLOCK_SIZE,
    scanner::{EntryKind, EntryStat, FileSystemScanner},
};

#[derive(Clone, Debug)]
enum MockKind {
    Dir,
    File { blocks: u64 },
    Symlink(PathBuf),
    Special,
}

#[derive(Clone, Debug)]
struct MockNode {
    kind: MockKind,
    dev: u64,
}

pub(crate) struct MockFileSystem {
    dev: u64,
    nodes: BTreeMap<PathBuf, MockNode>,
    denied: HashSet<PathBuf>,
    vanished: HashSet<PathBuf>,
}

impl MockFileSystem {
    /// Empty filesystem whose entries default to device `dev`.
    pub(crate) fn new(dev: u64) -> Self {
        Self {
            dev,
            nodes: BTreeMap::new(),
            denied: HashSet::new(),
            vanished: HashSet::new(),
        }
    }

    fn insert(mut self, path: &str, kind: MockKind, dev: u64) -> Self {
        self.nodes.insert(PathBuf::from(path), MockNode { kind, dev });
        self
    }

    pub(crate) fn dir(self, path: &str) -> Self {
        let dev = self.dev;
        self.insert(path, MockKind::Dir, dev)
    }

    pub(crate) fn dir_on(self, path: &str, dev: u64) -> Self {
        self.insert(path, MockKind::Dir, dev)
    }

    /// Regular file of `bytes` logical bytes, rounded up to whole blocks.
    pub(crate) fn file(self, path: &str, bytes: u64) -> Self {
        let dev = self.dev;
        self.file_on(path, bytes, dev)
    }

    pub(crate) fn file_on(self, path: &str, bytes: u64, dev: u64) -> Self {
        let blocks = bytes.div_ceil(BLOCK_SIZE);
        self.insert(path, MockKind::File { blocks }, dev)
    }

    pub(crate) fn file_blocks(self, path: &str, blocks: u64) -> Self {
        let dev = self.dev;
        self.insert(path, MockKind::File { blocks }, dev)
    }

    pub(crate) fn symlink(self, path: &str, target: &str) -> Self {
        let dev = self.dev;
        self.insert(path, MockKind::Symlink(PathBuf::from(target)), dev)
    }

    pub(crate) fn special(self, path: &str) -> Self {
        let dev = self.dev;
        self.insert(path, MockKind::Special, dev)
    }

    /// Directory exists but cannot be listed.
    pub(crate) fn deny(mut self, path: &str) -> Self {
        self.denied.insert(PathBuf::from(path));
        self
    }

    /// Entry is listed by its parent but disappears before it is stat'ed.
    pub(crate) fn vanish(mut self, path: &str) -> Self {
        self.vanished.insert(PathBuf::from(path));
        self
    }

    fn stat_of(node: &MockNode) -> EntryStat {
        let (kind, blocks) = match &node.kind {
            MockKind::Dir => (EntryKind::Directory, 8),
            MockKind::File { blocks } => (EntryKind::RegularFile, *blocks),
            MockKind::Symlink(_) => (EntryKind::Symlink, 0),
            MockKind::Special => (EntryKind::Other, 0),
        };
        EntryStat {
            kind,
            dev: node.dev,
            blocks,
        }
    }

    fn lookup(&self, path: &Path) -> io::Result<&MockNode> {
        if self.vanished.contains(path) {
            return Err(io::ErrorKind::NotFound.into());
        }
        self.nodes
            .get(path)
            .ok_or_else(|| io::ErrorKind::NotFound.into())
    }
}

impl FileSystemScanner for MockFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let node = self.lookup(dir)?;
        if !matches!(node.kind, MockKind::Dir) {
            return Err(io::Error::new(io::ErrorKind::Other, "not a directory"));
        }
        if self.denied.contains(dir) {
            return Err(io::ErrorKind::PermissionDenied.into());
        }
        Ok(self
            .nodes
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect())
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryStat> {
        self.lookup(path).map(Self::stat_of)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryStat> {
        let mut cur = path.to_path_buf();
        for _ in 0..8 {
            let node = self.lookup(&cur)?;
            match &node.kind {
                MockKind::Symlink(target) => cur = target.clone(),
                _ => return Ok(Self::stat_of(node)),
            }
        }
        Err(io::Error::new(io::ErrorKind::Other, "too many levels of symbolic links"))
    }
}
