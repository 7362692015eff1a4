use std::{fs::Metadata, os::unix::fs::MetadataExt};

use crate::scanner::{EntryKind, EntryStat};

/// Converts lstat/stat output. `st_blocks` is always in 512-byte units.
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
        dev: md.dev(),
        blocks: md.blocks(),
    }
}
