//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Drives the pipeline: for each input file, gunzip, segment, extract,
//! filter by accession prefix, write rows and fold counters.

use crate::{
    cli::Args,
    consts::{ACCEPTED_PREFIXES, EXONSET_SUFFIX, TXINFO_SUFFIX},
    error::{GbffError, Result},
    output::{Sink, output_path},
    record::{TranscriptRecord, accession, accession_prefix, parse_seq},
    segment::{BlockReader, locus_name},
    stats::{FileStats, RunStats},
    txinfo::{ExonSet, RowWriter, TxInfo},
};

use flate2::read::MultiGzDecoder;
use log::{debug, info, warn};

use std::{
    fs::{File, create_dir_all},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Main entry point: converts every input file and returns the run counters.
///
/// Without `--outdir`, txinfo rows go to stdout. With it, txinfo and
/// exonset files are written under `<outdir>/<prefix>.*`.
pub fn gbff2tx(args: Args) -> Result<RunStats> {
    let Args {
        files,
        origin,
        prefix,
        outdir,
        compress,
        ..
    } = args;

    let Some(outdir) = outdir else {
        debug!("No --outdir given, prefix {} is unused", prefix);

        let mut txinfo = RowWriter::txinfo(Sink::stdout())?;
        let stats = convert(&files, &origin, &mut txinfo, None);
        let rows = txinfo.rows();
        let closed = txinfo.into_inner().finish().map_err(GbffError::from);
        let stats = first_error(stats, closed)?;

        info!("Wrote {} rows to stdout", rows);
        return Ok(stats);
    };

    create_dir_all(&outdir).map_err(|e| GbffError::Output {
        path: outdir.clone(),
        source: e,
    })?;

    let txinfo_path = output_path(&outdir, &prefix, TXINFO_SUFFIX, compress);
    let exonset_path = output_path(&outdir, &prefix, EXONSET_SUFFIX, compress);

    let mut txinfo = open_rows(&txinfo_path, compress, RowWriter::txinfo)?;
    let mut exonset = open_rows(&exonset_path, compress, RowWriter::exonset)?;

    let stats = convert(&files, &origin, &mut txinfo, Some(&mut exonset));
    let rows = txinfo.rows();
    let closed = close_rows(txinfo, &txinfo_path).and(close_rows(exonset, &exonset_path));
    let stats = first_error(stats, closed)?;

    info!(
        "Wrote {} rows to {} and {}",
        rows,
        txinfo_path.display(),
        exonset_path.display()
    );

    Ok(stats)
}

fn open_rows(
    path: &Path,
    compress: bool,
    with_header: fn(Sink) -> std::io::Result<RowWriter<Sink>>,
) -> Result<RowWriter<Sink>> {
    let sink = Sink::create(path, compress)?;
    with_header(sink).map_err(|e| GbffError::Output {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Outputs are closed even when conversion fails; the conversion error wins
/// and a close failure after it is only logged.
fn first_error(stats: Result<RunStats>, closed: Result<()>) -> Result<RunStats> {
    match (stats, closed) {
        (Ok(stats), Ok(())) => Ok(stats),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close)) => {
            warn!("WARN: {} (after {})", close, e);
            Err(e)
        }
    }
}

fn close_rows(rows: RowWriter<Sink>, path: &Path) -> Result<()> {
    rows.into_inner().finish().map_err(|e| GbffError::Output {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Converts `files` in order, writing into the given row writers.
///
/// Per-file and run summaries are logged as each file completes.
pub fn convert<W: Write>(
    files: &[PathBuf],
    origin: &str,
    txinfo: &mut RowWriter<W>,
    mut exonset: Option<&mut RowWriter<W>>,
) -> Result<RunStats> {
    let mut run = RunStats::default();

    for path in files {
        let file = process_file(path, origin, txinfo, exonset.as_deref_mut(), &mut run)?;
        file.log_summary();
        run.fold(file);
    }

    txinfo.flush()?;
    if let Some(exonset) = exonset {
        exonset.flush()?;
    }

    run.log_summary();
    Ok(run)
}

/// Streams one gzip GBFF file through the pipeline.
pub fn process_file<W: Write>(
    path: &Path,
    origin: &str,
    txinfo: &mut RowWriter<W>,
    mut exonset: Option<&mut RowWriter<W>>,
    run: &mut RunStats,
) -> Result<FileStats> {
    info!("Processing records from file {}", path.display());

    let mut blocks = BlockReader::new(open_gz(path)?);
    let mut stats = FileStats::new(path);

    for block in blocks.by_ref() {
        let block = block.map_err(|e| GbffError::UnreadableInput {
            path: path.to_path_buf(),
            source: e,
        })?;

        process_block(
            &block,
            origin,
            txinfo,
            exonset.as_deref_mut(),
            &mut stats,
            run,
        )?;
    }

    stats.dropped = blocks.dropped();
    Ok(stats)
}

/// Parses one block, counts its prefix and writes its rows if accepted.
///
/// Returns the extracted record, or `None` when the accession prefix is
/// filtered out; filtered accessions go to the run's skipped ids.
pub fn process_block<W: Write>(
    block: &str,
    origin: &str,
    txinfo: &mut RowWriter<W>,
    exonset: Option<&mut RowWriter<W>>,
    file: &mut FileStats,
    run: &mut RunStats,
) -> Result<Option<TranscriptRecord>> {
    let seq = parse_seq(block)?;
    let locus = locus_name(block);
    let ac = accession(&seq, locus)?;
    let prefix = accession_prefix(&ac);

    file.prefixes.add(prefix, 1);

    if !ACCEPTED_PREFIXES.contains(&prefix) {
        debug!("Skipping {}: prefix {} is not written", ac, prefix);
        file.skipped += 1;
        run.skip(&ac);
        return Ok(None);
    }

    let record = TranscriptRecord::from_seq(&seq, locus)?;

    txinfo.write_row(&TxInfo::from_record(&record, origin))?;
    if let Some(exonset) = exonset {
        exonset.write_row(&ExonSet::from_record(&record, origin))?;
    }

    file.genes.insert(record.gene.clone());
    file.written += 1;

    Ok(Some(record))
}

fn open_gz(path: &Path) -> Result<BufReader<MultiGzDecoder<File>>> {
    let file = File::open(path).map_err(|e| GbffError::UnreadableInput {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(BufReader::new(MultiGzDecoder::new(file)))
}
