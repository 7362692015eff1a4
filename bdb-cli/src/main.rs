use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use bdb_core::OptionsBuilder;
use clap::{error::ErrorKind, ArgAction, Parser};
use humansize::{format_size, BINARY};

mod config;
mod export;

#[derive(Parser, Debug)]
#[command(
    name = "bdb",
    version,
    about = "Report the big disk branches of one filesystem",
    long_about = "Scans PATH and prints every directory above the reporting size as\n\
    '<path> <GiB>'. Stays on PATH's filesystem and never follows symlinks.",
    after_help = "Examples:\n\
      Root filesystem only, SSD\n\
        bdb /\n\
      Spinning disk, report branches above 10 GiB\n\
        bdb --threads 1 --size 10 /srv\n\
      Every nesting level, no collapsing\n\
        bdb --no-elision /home\n\
      Compare two saved runs\n\
        bdb /srv > old.txt; ...; bdb /srv > new.txt; bdb-growth old.txt new.txt\n\
    "
)]
struct Args {
    /// Directory to scan
    #[arg(value_name = "PATH", default_value = ".")]
    root: PathBuf,

    /// Number of worker threads (default 4; 1 for spinning disks)
    #[arg(
        short = 't',
        long,
        long_help = "Number of worker threads, each walking one top-level subdirectory at a time.\n\
    4 suits SSDs; use 1 on spinning disks to avoid seek thrashing."
    )]
    threads: Option<usize>,

    /// Minimum reportable size in GiB (default 1)
    #[arg(
        long,
        value_name = "GIB",
        long_help = "Directories of this many GiB or less are not reported, nor is anything below them."
    )]
    size: Option<u64>,

    /// Print every level of single-child directory chains
    #[arg(
        long = "no-elision",
        action = ArgAction::SetTrue,
        long_help = "By default a chain of directories that each hold a single reportable\n\
    subdirectory is shown as its deepest member only. This flag prints every level."
    )]
    no_elision: bool,

    /// Also write the report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Also write the report as CSV
    #[arg(long, value_name = "FILE", long_help = "Also write the report as CSV. Columns: path, bytes, gib")]
    csv: Option<PathBuf>,

    /// JSON config file with defaults for threads, size and no_elision
    #[arg(
        long,
        value_name = "FILE",
        long_help = "JSON file with defaults, e.g. {\"threads\": 1, \"size\": 4, \"no_elision\": false}.\n\
    Without this flag, bdb-config.json next to the executable is used if present.\n\
    Command-line flags win over the file."
    )]
    config: Option<PathBuf>,

    /// Log scan timing and totals to stderr
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    verbose: bool,
}

// Total and free bytes of the filesystem holding `path`
#[cfg(unix)]
fn fs_total_free(path: &Path) -> Option<(u64, u64)> {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};
    let c = CString::new(path.as_os_str().as_bytes()).ok()?;
    let mut s: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c.as_ptr(), &mut s as *mut _) };
    if rc == 0 {
        let total = (s.f_blocks as u128).saturating_mul(s.f_frsize as u128) as u64;
        let free = (s.f_bfree as u128).saturating_mul(s.f_frsize as u128) as u64;
        Some((total, free))
    } else {
        None
    }
}

#[cfg(not(unix))]
fn fs_total_free(_path: &Path) -> Option<(u64, u64)> {
    None
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(args: Args) -> Result<()> {
    let file_cfg = config::load(args.config.as_deref())?;
    let mut cli = OptionsBuilder::new();
    if let Some(t) = args.threads {
        cli = cli.threads(t);
    }
    if let Some(s) = args.size {
        cli = cli.min_report_gib(s);
    }
    if args.no_elision {
        cli = cli.elide(false);
    }
    let opt = cli.or(file_cfg.into_builder()).build()?;

    let t0 = std::time::Instant::now();
    let tree = bdb_core::scan_directory(&args.root, &opt)?;
    log::info!(
        "scanned {} with {} threads in {:.2?}: {} in {} retained dirs",
        tree.path.display(),
        opt.threads,
        t0.elapsed(),
        format_size(tree.size, BINARY),
        tree.node_count()
    );
    if let Some((total, free)) = fs_total_free(&tree.path) {
        let used = total.saturating_sub(free);
        let pct = if total > 0 {
            used as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        log::info!(
            "filesystem: total={} | used={} | free={} | usage={:.1}%",
            format_size(total, BINARY),
            format_size(used, BINARY),
            format_size(free, BINARY),
            pct
        );
    }

    let lines = bdb_core::render_with(&tree, &opt);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for l in &lines {
        writeln!(out, "{l}")?;
    }
    out.flush()?;

    if let Some(p) = &args.csv {
        export::write_csv(p, &lines)?;
        log::info!("wrote CSV: {}", p.display());
    }
    if let Some(p) = &args.json {
        export::write_json(p, &lines)?;
        log::info!("wrote JSON: {}", p.display());
    }
    Ok(())
}

/// Parses the command line. Help and version go through clap untouched; any
/// other argument error is cut to its first line and exits 1.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                eprintln!("bdb: {}", first_line(&e.to_string()));
                std::process::exit(1);
            }
        },
    }
}

fn first_line(rendered: &str) -> &str {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line)
}

fn main() {
    let args = parse_args();
    init_logging(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("bdb: {e:#}");
        std::process::exit(1);
    }
}
