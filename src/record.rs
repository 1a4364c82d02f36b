//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Turns one segmented GBFF block into a [`TranscriptRecord`]: accession,
//! HGNC gene symbol, CDS span and exon spans.
//!
//! All coordinates are interbase (0-based, right-open), as returned by
//! `gb_io`'s location bounds.

use crate::{
    error::{GbffError, Result},
    segment::locus_name,
};

use gb_io::{
    reader::SeqReader,
    seq::{Feature, Seq},
};

use std::fmt;

/// Zero-based half-open coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

impl From<(i64, i64)> for Interval {
    fn from((start, end): (i64, i64)) -> Self {
        Self { start, end }
    }
}

/// Renders as `start,end`, the encoding used in every output column.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

/// Fields extracted from a single transcript record.
///
/// # Fields
///
/// - `accession`: versioned identifier, e.g. `NM_053283.2`
/// - `gene`: the single `/gene` value of the first `gene` feature
/// - `cds`: bounds of the first `CDS` feature, if any
/// - `exons`: bounds of every `exon` feature, in record order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub accession: String,
    pub gene: String,
    pub cds: Option<Interval>,
    pub exons: Vec<Interval>,
}

impl TranscriptRecord {
    /// Parses the first record of `block` and extracts its fields.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gbff2tx::record::TranscriptRecord;
    ///
    /// let record = TranscriptRecord::parse(&block)?;
    /// println!("{} -> {}", record.accession, record.gene);
    /// ```
    pub fn parse(block: &str) -> Result<Self> {
        Self::from_seq(&parse_seq(block)?, locus_name(block))
    }

    /// Extracts the transcript fields from an already parsed record.
    ///
    /// `locus` names the record in errors raised before its accession is
    /// known.
    pub fn from_seq(seq: &Seq, locus: &str) -> Result<Self> {
        let accession = accession(seq, locus)?;
        let gene = gene_symbol(&seq.features, &accession)?;

        let cds = seq
            .features
            .iter()
            .find(|f| is_kind(f, "CDS"))
            .map(|f| bounds(f, &accession))
            .transpose()?;

        let exons = seq
            .features
            .iter()
            .filter(|f| is_kind(f, "exon"))
            .map(|f| bounds(f, &accession))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            accession,
            gene,
            cds,
            exons,
        })
    }

    /// First two characters of the accession (`NM`, `NR`, `XM`, ...).
    pub fn prefix(&self) -> &str {
        accession_prefix(&self.accession)
    }
}

/// Parses the first GenBank record found in `block`.
///
/// A record without a sequence body (no ORIGIN data) is malformed.
pub fn parse_seq(block: &str) -> Result<Seq> {
    let locus = locus_name(block);

    let seq = SeqReader::new(block.as_bytes())
        .next()
        .ok_or_else(|| GbffError::malformed(locus, "no record found in block"))?
        .map_err(|e| GbffError::malformed(locus, format!("cannot parse record: {}", e)))?;

    if seq.seq.is_empty() {
        return Err(GbffError::malformed(locus, "record has no sequence"));
    }

    Ok(seq)
}

/// First two characters of an accession, or the whole string if shorter.
pub fn accession_prefix(accession: &str) -> &str {
    accession.get(..2).unwrap_or(accession)
}

/// Record identifier: VERSION first, then ACCESSION, then the LOCUS name.
pub fn accession(seq: &Seq, locus: &str) -> Result<String> {
    [&seq.version, &seq.accession, &seq.name]
        .into_iter()
        .flatten()
        .find_map(|field| field.split_whitespace().next())
        .map(str::to_string)
        .ok_or_else(|| GbffError::malformed(locus, "record has no identifier"))
}

fn is_kind(feature: &Feature, kind: &str) -> bool {
    &*feature.kind == kind
}

fn gene_symbol(features: &[Feature], accession: &str) -> Result<String> {
    let gene = features
        .iter()
        .find(|f| is_kind(f, "gene"))
        .ok_or_else(|| GbffError::malformed(accession, "no gene feature"))?;

    let values: Vec<&str> = gene
        .qualifiers
        .iter()
        .filter(|(key, _)| &**key == "gene")
        .filter_map(|(_, value)| value.as_deref())
        .collect();

    match values.as_slice() {
        [symbol] => Ok(symbol.to_string()),
        [] => Err(GbffError::malformed(
            accession,
            "gene feature has no /gene qualifier",
        )),
        many => Err(GbffError::malformed(
            accession,
            format!(
                "gene feature has {} /gene values: {}",
                many.len(),
                many.join(", ")
            ),
        )),
    }
}

fn bounds(feature: &Feature, accession: &str) -> Result<Interval> {
    feature.location.find_bounds().map(Interval::from).map_err(|e| {
        GbffError::malformed(
            accession,
            format!("cannot resolve {} location: {}", &*feature.kind, e),
        )
    })
}
