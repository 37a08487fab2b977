//! PDF writing and saving operations.
//!
//! The combined document is written to a uniquely named temporary file in
//! the output's directory and persisted into place, so a failed write never
//! leaves a truncated output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(doc, Path::new("combined.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tokio::task;
use tracing::debug;

use crate::config::OverwriteMode;
use crate::error::{PdfCombineError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temporary file, then rename.
    pub atomic: bool,

    /// Compress content streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Refuse to proceed if `path` exists and `mode` does not allow
    /// replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::OutputExists`] under
    /// [`OverwriteMode::NoClobber`] when something already exists at `path`.
    pub fn check_output(path: &Path, mode: OverwriteMode) -> Result<()> {
        match mode {
            OverwriteMode::Force => Ok(()),
            OverwriteMode::NoClobber => {
                if path.symlink_metadata().is_ok() {
                    Err(PdfCombineError::output_exists(path.to_path_buf()))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Save a PDF document and return statistics about the write.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::OutputWrite`] if the file cannot be
    /// created, serialized, flushed or renamed into place. The temporary
    /// file is removed on failure.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || write_blocking(doc, path_buf, &options))
            .await
            .map_err(|e| PdfCombineError::Io {
                source: std::io::Error::other(e),
            })??;

        debug!(
            path = %stats.output_path.display(),
            bytes = stats.file_size,
            "wrote output"
        );

        Ok(stats)
    }
}

fn write_blocking(mut doc: Document, path: PathBuf, options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    if options.compress {
        doc.compress();
    }

    if options.atomic {
        write_atomic(&mut doc, &path, options.buffer_size)?;
    } else {
        let file = std::fs::File::create(&path).map_err(|e| write_error(&path, e))?;
        serialize(&mut doc, file, &path, options.buffer_size)?;
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compressed: options.compress,
    })
}

/// Write into a fresh temporary file next to `path`, then rename it over
/// `path`. The temporary file is deleted if anything fails before the rename.
fn write_atomic(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(|e| write_error(path, e))?;
    let file = temp.reopen().map_err(|e| write_error(path, e))?;
    serialize(doc, file, path, buffer_size)?;

    temp.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}

fn serialize(doc: &mut Document, file: std::fs::File, path: &Path, buffer_size: usize) -> Result<()> {
    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    doc.save_to(&mut writer)
        .map_err(|e| write_error(path, std::io::Error::other(e)))?;
    writer.flush().map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, source: std::io::Error) -> PdfCombineError {
    PdfCombineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    }
}
