/// File size constants
pub mod sizes {
    /// Unit of `st_blocks` (see stat(2)), independent of the filesystem block size
    pub const BLOCK_SIZE: u64 = 512;

    /// One gibibyte; report sizes are printed in this unit
    pub const GIB: u64 = 1 << 30;

    /// Subdirectories below this total are folded into their parent instead of
    /// being kept as tree nodes
    pub const MATERIALIZE_THRESHOLD: u64 = GIB;
}

/// Scan defaults
pub mod defaults {
    /// Worker threads; 4 suits SSDs, 1 is better for spinning disks
    pub const THREADS: usize = 4;

    /// Minimum reportable size in whole GiB
    pub const MIN_REPORT_GIB: u64 = 1;
}
