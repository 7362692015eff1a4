use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::sizes::MATERIALIZE_THRESHOLD;

/// Disk footprint of one directory.
///
/// `size` covers every regular file below the directory, including those in
/// subdirectories too small to be kept in `children`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SummaryNode {
    pub path: PathBuf,
    /// Allocated bytes
    pub size: u64,
    pub children: Vec<SummaryNode>,
}

impl SummaryNode {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: 0,
            children: Vec::new(),
        }
    }

    /// Folds a finished subdirectory into this node, keeping it as a child
    /// only if it reaches the materialization threshold.
    #[inline]
    pub fn absorb(&mut self, child: SummaryNode) {
        self.size += child.size;
        if child.size >= MATERIALIZE_THRESHOLD {
            self.children.push(child);
        }
    }

    /// Like [`absorb`](Self::absorb) but always keeps the child. Used for the
    /// scan root's direct subdirectories.
    #[inline]
    pub fn adopt(&mut self, child: SummaryNode) {
        self.size += child.size;
        self.children.push(child);
    }

    /// Depth-first lookup by path.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&SummaryNode> {
        let path = path.as_ref();
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SummaryNode::node_count).sum::<usize>()
    }
}
