use std::{fmt, path::PathBuf};

use crate::{constants::sizes::GIB, tree::SummaryNode, Options};

/// One reported directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLine {
    pub path: PathBuf,
    pub bytes: u64,
}

impl ReportLine {
    #[inline]
    pub fn gib(&self) -> f64 {
        self.bytes as f64 / GIB as f64
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.path.display(), self.gib())
    }
}

/// Depth-first report of `node`: parents before children, siblings largest
/// first. A node is reported only if its size exceeds `min_report_bytes`; its
/// subtree is pruned otherwise. With `elide`, a chain of single reportable
/// children is skipped down to its deepest node.
pub fn render(node: &SummaryNode, min_report_bytes: u64, elide: bool) -> Vec<ReportLine> {
    let mut out = Vec::new();
    render_into(node, min_report_bytes, elide, &mut out);
    out
}

/// [`render`] with the report settings taken from `opt`.
pub fn render_with(node: &SummaryNode, opt: &Options) -> Vec<ReportLine> {
    render(node, opt.min_report_bytes, opt.elide)
}

fn render_into(node: &SummaryNode, min: u64, elide: bool, out: &mut Vec<ReportLine>) {
    if node.size <= min {
        return;
    }
    out.push(ReportLine {
        path: node.path.clone(),
        bytes: node.size,
    });
    if elide {
        let mut tail = node;
        while let [only] = tail.children.as_slice() {
            if only.size <= min {
                break;
            }
            tail = only;
        }
        if !std::ptr::eq(tail, node) {
            return render_into(tail, min, elide, out);
        }
    }
    for child in sorted_children(node) {
        render_into(child, min, elide, out);
    }
}

/// Size descending, path ascending on ties.
fn sorted_children(node: &SummaryNode) -> Vec<&SummaryNode> {
    let mut kids: Vec<&SummaryNode> = node.children.iter().collect();
    kids.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    kids
}
