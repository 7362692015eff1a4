use std::path::Path;

use crate::{
    scanner::{list_entries, Listed},
    tree::SummaryNode,
    ScanContext,
};

/// Computes the allocated size of the subtree at `dir` and the tree of its
/// materialized subdirectories.
///
/// Touches nothing but the node it builds, so disjoint subtrees can be walked
/// from several threads at once. Recursion follows the directory depth.
pub fn walk(ctx: &ScanContext, dir: &Path) -> SummaryNode {
    let mut node = SummaryNode::new(dir);
    for entry in list_entries(ctx.scanner, dir, ctx.device) {
        match entry {
            Listed::File { bytes, .. } => node.size += bytes,
            Listed::Directory { name } => node.absorb(walk(ctx, &dir.join(name))),
        }
    }
    node
}
