//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Tab-delimited rows written for each accepted transcript.
//!
//! Column names and order are the compatibility contract with downstream
//! loaders:
//!
//! - txinfo: `ac origin hgnc cds_se_i exons_se_i`
//! - exonset: `tx_ac alt_ac method strand exons_se_i`

use crate::{
    consts::{EXONSET_COLUMNS, FIELD_SEP, INTERVAL_SEP, SELF_STRAND, TXINFO_COLUMNS},
    record::{Interval, TranscriptRecord},
};

use std::{
    fmt,
    io::{self, Write},
};

/// Joins intervals as `s,e;s,e;...`; empty when there are none.
pub fn format_intervals(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(INTERVAL_SEP)
}

/// Per-transcript metadata row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInfo {
    pub ac: String,
    pub origin: String,
    pub hgnc: String,
    pub cds_se_i: Option<Interval>,
    pub exons_se_i: Vec<Interval>,
}

impl TxInfo {
    pub fn from_record(record: &TranscriptRecord, origin: &str) -> Self {
        Self {
            ac: record.accession.clone(),
            origin: origin.to_string(),
            hgnc: record.gene.clone(),
            cds_se_i: record.cds,
            exons_se_i: record.exons.clone(),
        }
    }
}

impl fmt::Display for TxInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cds = self.cds_se_i.map(|c| c.to_string()).unwrap_or_default();
        write!(
            f,
            "{ac}{s}{origin}{s}{hgnc}{s}{cds}{s}{exons}",
            ac = self.ac,
            origin = self.origin,
            hgnc = self.hgnc,
            cds = cds,
            exons = format_intervals(&self.exons_se_i),
            s = FIELD_SEP,
        )
    }
}

/// Exon set of a transcript aligned to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonSet {
    pub tx_ac: String,
    pub alt_ac: String,
    pub method: String,
    pub strand: i8,
    pub exons_se_i: Vec<Interval>,
}

impl ExonSet {
    pub fn from_record(record: &TranscriptRecord, method: &str) -> Self {
        Self {
            tx_ac: record.accession.clone(),
            alt_ac: record.accession.clone(),
            method: method.to_string(),
            strand: SELF_STRAND,
            exons_se_i: record.exons.clone(),
        }
    }
}

impl fmt::Display for ExonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{tx}{s}{alt}{s}{method}{s}{strand}{s}{exons}",
            tx = self.tx_ac,
            alt = self.alt_ac,
            method = self.method,
            strand = self.strand,
            exons = format_intervals(&self.exons_se_i),
            s = FIELD_SEP,
        )
    }
}

/// Writes a header line on creation, then one line per row.
pub struct RowWriter<W: Write> {
    inner: W,
    rows: usize,
}

impl<W: Write> RowWriter<W> {
    pub fn new(mut inner: W, columns: &[&str]) -> io::Result<Self> {
        writeln!(inner, "{}", columns.join(FIELD_SEP))?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn txinfo(inner: W) -> io::Result<Self> {
        Self::new(inner, &TXINFO_COLUMNS)
    }

    pub fn exonset(inner: W) -> io::Result<Self> {
        Self::new(inner, &EXONSET_COLUMNS)
    }

    pub fn write_row<T: fmt::Display>(&mut self, row: &T) -> io::Result<()> {
        writeln!(self.inner, "{}", row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
