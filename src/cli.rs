//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Command-line arguments.

use crate::consts::{DEFAULT_ORIGIN, DEFAULT_PREFIX};

use clap::{ArgAction, Parser};
use log::Level;

use std::{fmt, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Gzip-compressed GenBank flat files (.gbff.gz)
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Origin label written in the origin column
    #[arg(short = 'o', long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Prefix for output files (only used with --outdir)
    #[arg(short = 'p', long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Write <prefix>.txinfo and <prefix>.exonset here instead of txinfo to stdout
    #[arg(short = 'd', long)]
    pub outdir: Option<PathBuf>,

    /// Gzip-compress output files (requires --outdir)
    #[arg(short = 'Z', long, requires = "outdir", default_value = "false", action = ArgAction::SetTrue)]
    pub compress: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

/// Formats the Args struct as a comma-separated string of key=value pairs.
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");

        write!(
            f,
            "files=[{}], origin={}, prefix={}, outdir={}, compress={}, level={}",
            files,
            self.origin,
            self.prefix,
            self.outdir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.compress,
            self.level,
        )
    }
}
