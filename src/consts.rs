//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Shared constants: accepted accession prefixes, output columns and defaults.

/// Accession prefixes written to the outputs (RefSeq mRNA and ncRNA)
pub const ACCEPTED_PREFIXES: [&str; 2] = ["NM", "NR"];

/// LOCUS lines that open a transcript record
pub const LOCUS_PATTERN: &str = r"^LOCUS\s+(NM|NR)_\d+";

pub const LOCUS_KEYWORD: &str = "LOCUS";
pub const RECORD_TERMINATOR: &str = "//";

pub const DEFAULT_ORIGIN: &str = "NCBI";
pub const DEFAULT_PREFIX: &str = "ncbi-gbff";

pub const TXINFO_COLUMNS: [&str; 5] = ["ac", "origin", "hgnc", "cds_se_i", "exons_se_i"];
pub const EXONSET_COLUMNS: [&str; 5] = ["tx_ac", "alt_ac", "method", "strand", "exons_se_i"];

pub const TXINFO_SUFFIX: &str = "txinfo";
pub const EXONSET_SUFFIX: &str = "exonset";

// transcripts are aligned to themselves, always on the forward strand
pub const SELF_STRAND: i8 = 1;

pub const FIELD_SEP: &str = "\t";
pub const INTERVAL_SEP: &str = ";";
