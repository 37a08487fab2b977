//! PDF reading and loading operations.
//!
//! Inputs are loaded one at a time in command-line order; each distinct
//! path is loaded once even if it appears in several input groups. The
//! blocking `lopdf` parse runs on tokio's blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&PathBuf::from("a.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfCombineError, Result};
use crate::plan::PageCountLookup;
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Statistics for a batch load operation.
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    /// Number of distinct PDFs loaded.
    pub files_loaded: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of loaded files.
    pub total_size: u64,

    /// Total number of pages across loaded files.
    pub total_pages: usize,
}

impl LoadStatistics {
    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::FileNotFound`] or
    /// [`PdfCombineError::NotAFile`].
    pub fn check_path(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(PdfCombineError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfCombineError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is a directory
    /// - File is not a valid PDF
    /// - PDF is encrypted
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let load_path = path_buf.clone();
        let doc = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| PdfCombineError::Io {
                source: std::io::Error::other(e),
            })?
            .map_err(|e| {
                let err_msg = e.to_string();
                let lowered = err_msg.to_lowercase();
                if lowered.contains("encrypt") || lowered.contains("password") {
                    PdfCombineError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfCombineError::unreadable_pdf(path_buf.clone(), err_msg)
                }
            })?;

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            bytes = loaded.file_size,
            "loaded pdf"
        );

        Ok(loaded)
    }

    /// Load every distinct path, sequentially, in the order given.
    ///
    /// Stops at the first failure.
    pub async fn load_all<'a, I>(&self, paths: I) -> Result<LoadedDocuments>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let start = Instant::now();
        let mut documents = LoadedDocuments::default();

        for path in paths {
            if documents.contains(path) {
                continue;
            }
            let loaded = self.load(path).await?;
            documents.insert(loaded);
        }

        documents.statistics.total_time = start.elapsed();
        Ok(documents)
    }
}

/// The documents loaded for one invocation, keyed by input path.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    documents: Vec<LoadedPdf>,
    index: HashMap<PathBuf, usize>,
    statistics: LoadStatistics,
}

impl LoadedDocuments {
    /// Add a loaded document; a later document for the same path replaces
    /// the earlier one in lookups.
    pub fn insert(&mut self, loaded: LoadedPdf) {
        self.statistics.files_loaded += 1;
        self.statistics.total_size += loaded.file_size;
        self.statistics.total_pages += loaded.page_count;

        self.index.insert(loaded.path.clone(), self.documents.len());
        self.documents.push(loaded);
    }

    /// True if `path` has been loaded.
    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    /// The loaded document for `path`.
    pub fn get(&self, path: &Path) -> Option<&LoadedPdf> {
        self.index.get(path).map(|&idx| &self.documents[idx])
    }

    /// Loaded documents in load order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedPdf> {
        self.documents.iter()
    }

    /// Number of distinct documents loaded.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Aggregate statistics for the loads.
    pub fn statistics(&self) -> &LoadStatistics {
        &self.statistics
    }
}

impl PageCountLookup for LoadedDocuments {
    fn page_count(&self, path: &Path) -> Result<usize> {
        self.get(path)
            .map(|loaded| loaded.page_count)
            .ok_or_else(|| PdfCombineError::file_not_found(path.to_path_buf()))
    }
}
