//! I/O operations for pdfcombine.
//!
//! This module handles loading the input PDFs and writing the combined
//! document:
//! - Sequential loading in command-line order, one load per distinct path
//! - Page counts exposed to the planner through [`PageCountLookup`]
//! - Atomic writes with overwrite protection
//!
//! [`PageCountLookup`]: crate::plan::PageCountLookup
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("input.pdf")).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(loaded.document, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadStatistics, LoadedDocuments, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
