//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This tool reads gzip-compressed NCBI GenBank flat files (RefSeq
//! `*.rna.gbff.gz` releases), keeps the NM/NR transcript records and writes,
//! per transcript, its HGNC symbol, CDS span and exon spans as tab-delimited
//! rows (txinfo), plus the exon set of each transcript aligned to itself
//! (exonset) when writing to an output directory.
//!
//! # Usage
//!
//! ```bash
//! Usage: gbff2tx [OPTIONS] <FILES>...
//!
//! Arguments:
//!   <FILES>...  Gzip-compressed GenBank flat files (.gbff.gz)
//!
//! Options:
//!   -o, --origin <ORIGIN>    Origin label written in the origin column [default: NCBI]
//!   -p, --prefix <PREFIX>    Prefix for output files (only used with --outdir) [default: ncbi-gbff]
//!   -d, --outdir <OUTDIR>    Write <prefix>.txinfo and <prefix>.exonset here instead of txinfo to stdout
//!   -Z, --compress           Gzip-compress output files (requires --outdir)
//!   -L, --level <LEVEL>      Logging verbosity level [default: info]
//!   -h, --help               Print help
//!   -V, --version            Print version
//! ```

pub mod cli;
pub mod consts;
pub mod core;
pub mod error;
pub mod output;
pub mod record;
pub mod segment;
pub mod stats;
pub mod txinfo;

pub use cli::Args;
pub use crate::core::{convert, gbff2tx, process_block, process_file};
pub use error::{GbffError, Result};
pub use record::{Interval, TranscriptRecord};
pub use stats::{FileStats, RunStats};
pub use txinfo::{ExonSet, RowWriter, TxInfo};
