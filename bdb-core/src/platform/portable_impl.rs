use std::fs::Metadata;

use crate::{
    constants::sizes::BLOCK_SIZE,
    scanner::{EntryKind, EntryStat},
};

// No portable device id or block count: everything is one device and the
// allocation is approximated from the logical length.
#[inline]
pub fn entry_stat(md: &Metadata) -> EntryStat {
    let ft = md.file_type();
    let kind = if ft.is_symlink() {
        EntryKind::Symlink
    } else if ft.is_dir() {
        EntryKind::Directory
    } else if ft.is_file() {
        EntryKind::RegularFile
    } else {
        EntryKind::Other
    };
    EntryStat {
        kind,
        dev: 0,
        blocks: md.len().div_ceil(BLOCK_SIZE),
    }
}
