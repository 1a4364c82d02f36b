//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Splits a concatenated GBFF stream into whole-record text blocks.
//!
//! A block starts at a `LOCUS` line naming an NM/NR transcript and ends at
//! the next `//` line (inclusive). Everything outside an open block is
//! discarded, which is also how records of any other kind are skipped.

use crate::consts::{LOCUS_KEYWORD, LOCUS_PATTERN, RECORD_TERMINATOR};

use log::{debug, warn};
use regex::Regex;

use std::{
    io::{self, BufRead},
    sync::OnceLock,
};

fn locus_regex() -> &'static Regex {
    static LOCUS: OnceLock<Regex> = OnceLock::new();
    LOCUS.get_or_init(|| {
        Regex::new(LOCUS_PATTERN)
            .unwrap_or_else(|e| panic!("ERROR: invalid LOCUS pattern {}: {}", LOCUS_PATTERN, e))
    })
}

/// Returns true if `line` opens an NM/NR record.
pub fn is_transcript_locus(line: &str) -> bool {
    line.starts_with(LOCUS_KEYWORD) && locus_regex().is_match(line)
}

/// Name token of the LOCUS line that opens `block`, or an empty string.
pub fn locus_name(block: &str) -> &str {
    block
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
}

/// Pull-based record segmenter over any buffered reader.
///
/// Yields each complete block verbatim, line terminators included. A block
/// still open at end of stream is never yielded: it is dropped with a
/// warning and counted in [`BlockReader::dropped`].
///
/// # Example
///
/// ```rust,ignore
/// use gbff2tx::segment::BlockReader;
///
/// let text = "LOCUS       NM_000001   10 bp    mRNA    linear   PRI 01-JAN-2020\n//\n";
/// let blocks: Vec<String> = BlockReader::new(text.as_bytes())
///     .collect::<std::io::Result<_>>()
///     .unwrap();
/// assert_eq!(blocks.len(), 1);
/// ```
pub struct BlockReader<R> {
    reader: R,
    line: String,
    block: Option<String>,
    dropped: usize,
    done: bool,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            block: None,
            dropped: 0,
            done: false,
        }
    }

    /// Number of unterminated blocks discarded so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn discard_open_block(&mut self, why: &str) {
        if let Some(open) = self.block.take() {
            self.dropped += 1;
            warn!(
                "WARN: dropping unterminated record {} ({})",
                locus_name(&open),
                why
            );
        }
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    self.discard_open_block("end of stream");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }

            if is_transcript_locus(&self.line) {
                self.discard_open_block("new LOCUS before //");
                self.block = Some(String::new());
            }

            if let Some(block) = self.block.as_mut() {
                block.push_str(&self.line);

                if self.line.starts_with(RECORD_TERMINATOR) {
                    let block = self.block.take();
                    if let Some(b) = &block {
                        debug!("Segmented record {}", locus_name(b));
                    }
                    return block.map(Ok);
                }
            }
        }
    }
}
