//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Per-file and run-wide counters reported at the end of each file and of
//! the run.
//!
//! Run-wide genes are folded with a symmetric difference: a gene written in
//! an odd number of files stays in `total_genes`, a gene written in an even
//! number of files cancels out.

use log::info;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

/// Accession prefix histogram, e.g. `NM=3, NR=1, XM=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCounts(BTreeMap<String, usize>);

impl PrefixCounts {
    pub fn add(&mut self, prefix: &str, n: usize) {
        *self.0.entry(prefix.to_string()).or_default() += n;
    }

    pub fn merge(&mut self, other: &PrefixCounts) {
        for (prefix, n) in &other.0 {
            self.add(prefix, *n);
        }
    }

    pub fn get(&self, prefix: &str) -> usize {
        self.0.get(prefix).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl fmt::Display for PrefixCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self
            .0
            .iter()
            .map(|(prefix, n)| format!("{}={}", prefix, n))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", counts)
    }
}

/// Counters for one input file.
#[derive(Debug, Clone, Default)]
pub struct FileStats {
    pub path: PathBuf,
    pub prefixes: PrefixCounts,
    pub genes: BTreeSet<String>,
    pub written: usize,
    pub skipped: usize,
    pub dropped: usize,
}

impl FileStats {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn log_summary(&self) {
        info!(
            "{}: {} records, {} genes, {} rows written, {} skipped, {} truncated; prefixes {}",
            self.path.display(),
            self.prefixes.total(),
            self.genes.len(),
            self.written,
            self.skipped,
            self.dropped,
            self.prefixes
        );
    }
}

/// Counters accumulated over all input files.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub prefixes: PrefixCounts,
    pub total_genes: BTreeSet<String>,
    pub skipped_ids: BTreeSet<String>,
    pub files: Vec<FileStats>,
}

impl RunStats {
    /// Records an accession whose prefix is not written.
    pub fn skip(&mut self, accession: &str) {
        self.skipped_ids.insert(accession.to_string());
    }

    /// Folds a finished file into the run totals.
    pub fn fold(&mut self, file: FileStats) {
        self.prefixes.merge(&file.prefixes);
        self.total_genes = &self.total_genes ^ &file.genes;
        self.files.push(file);
    }

    pub fn written(&self) -> usize {
        self.files.iter().map(|f| f.written).sum()
    }

    pub fn log_summary(&self) {
        info!(
            "{} files: {} records, {} genes (odd-count across files), {} rows written, {} skipped ids; prefixes {}",
            self.files.len(),
            self.prefixes.total(),
            self.total_genes.len(),
            self.written(),
            self.skipped_ids.len(),
            self.prefixes
        );
    }
}
