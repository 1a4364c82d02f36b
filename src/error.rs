//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Error types shared by the segmenter, the extractor and the writers.

use thiserror::Error;

use std::path::PathBuf;

/// Result type alias for gbff2tx operations
pub type Result<T> = std::result::Result<T, GbffError>;

/// Fatal conditions that abort a run.
///
/// Records filtered out by accession prefix are not errors and never
/// surface here.
#[derive(Debug, Error)]
pub enum GbffError {
    /// Input file missing, not gzip, or corrupt while streaming
    #[error("ERROR: cannot read {}: {source}", .path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record that fails structural extraction
    #[error("ERROR: malformed record {locus}: {reason}")]
    MalformedRecord { locus: String, reason: String },

    /// Output file that cannot be created or finished
    #[error("ERROR: cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure writing rows to an already opened sink
    #[error("ERROR: I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GbffError {
    pub(crate) fn malformed(locus: impl Into<String>, reason: impl Into<String>) -> Self {
        GbffError::MalformedRecord {
            locus: locus.into(),
            reason: reason.into(),
        }
    }
}
