//! Lists the directories that grew between two saved `bdb` reports.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Result;
use bdb_core::growth::{growth, read_report};
use clap::{error::ErrorKind, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "bdb-growth",
    version,
    about = "Print directories whose size grew between two bdb reports",
    long_about = "Reads two files of bdb output and prints '<path> <growth in GiB>' for\n\
    every directory of NEW that is larger than in OLD. Directories missing from OLD\n\
    count as grown from zero."
)]
struct Args {
    /// Older report
    old: PathBuf,
    /// Newer report
    new: PathBuf,
}

fn run(args: Args) -> Result<()> {
    let older = read_report(&args.old)?;
    let newer = read_report(&args.new)?;
    let grown = growth(&older, &newer);
    log::debug!(
        "{} old entries, {} new entries, {} grew",
        older.len(),
        newer.len(),
        grown.len()
    );
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for g in &grown {
        writeln!(out, "{g}")?;
    }
    out.flush()?;
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
                eprintln!("bdb-growth: {}", first_line(&e.to_string()));
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run(parse_args()) {
        eprintln!("bdb-growth: {e:#}");
        std::process::exit(1);
    }
}
