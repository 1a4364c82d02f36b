//! extract transcript info and exon sets from NCBI GenBank flat files
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Output sinks: stdout, plain files or gzip-compressed files.

use crate::error::{GbffError, Result};

use flate2::{Compression, write::GzEncoder};

use std::{
    fs::File,
    io::{self, BufWriter, Stdout, Write},
    path::{Path, PathBuf},
};

pub enum Sink {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    pub fn stdout() -> Self {
        Sink::Stdout(BufWriter::new(io::stdout()))
    }

    pub fn create(path: &Path, compress: bool) -> Result<Self> {
        let file = File::create(path).map_err(|e| GbffError::Output {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(if compress {
            Sink::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default()))
        } else {
            Sink::Plain(BufWriter::new(file))
        })
    }

    /// Flushes buffers and, for gzip sinks, writes the gzip trailer.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Sink::Stdout(mut w) => w.flush(),
            Sink::Plain(mut w) => w.flush(),
            Sink::Gzip(w) => w.finish()?.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(w) => w.write(buf),
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(w) => w.flush(),
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// `<outdir>/<prefix>.<suffix>`, plus `.gz` when compressing.
pub fn output_path(outdir: &Path, prefix: &str, suffix: &str, compress: bool) -> PathBuf {
    with_gzip_extension(outdir.join(format!("{}.{}", prefix, suffix)), compress)
}

fn with_gzip_extension(mut path: PathBuf, compress: bool) -> PathBuf {
    if compress && path.extension().and_then(|ext| ext.to_str()) != Some("gz") {
        path.as_mut_os_string().push(".gz");
    }

    path
}
