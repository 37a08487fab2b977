//! pdfcombine - Combine, reorder, subset and rotate pages of PDF files.
//!
//! Each input file carries its own page selection (`--keep` or `--remove`
//! a page range) and rotation. The selections are resolved into a
//! [`Plan`](plan::Plan), an ordered list of page instructions, which is
//! then assembled into a single new document.
//!
//! # Examples
//!
//! ## Resolving a plan
//!
//! ```
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//! use pdfcombine::input::parse_inputs;
//! use pdfcombine::plan::PlanBuilder;
//!
//! let parsed = parse_inputs(["foo.pdf", "--keep", "1-2", "bar.pdf", "--remove", "1-2"]).unwrap();
//! let counts = HashMap::from([
//!     (PathBuf::from("foo.pdf"), 3),
//!     (PathBuf::from("bar.pdf"), 4),
//! ]);
//!
//! let plan = PlanBuilder::new().build(&parsed.inputs, &counts).unwrap();
//! let indices: Vec<usize> = plan.iter().map(|p| p.page_index).collect();
//! assert_eq!(indices, vec![0, 1, 2, 3]);
//! ```
//!
//! ## Writing the combined document
//!
//! ```no_run
//! use pdfcombine::config::Config;
//! use pdfcombine::input::InputSpec;
//! use pdfcombine::range::PageRange;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(
//!     vec![
//!         InputSpec::new("foo.pdf").with_keep(PageRange::parse("1-2")?),
//!         InputSpec::new("bar.pdf").with_remove(PageRange::parse("1-2")?),
//!     ],
//!     "out.pdf",
//! );
//!
//! let result = pdfcombine::combine(&config).await?;
//! println!("Wrote {} pages", result.statistics.output_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod plan;
pub mod range;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, OverwriteMode, Rotation};
pub use error::{PdfCombineError, Result};
pub use input::{InputSpec, Selection};
pub use merge::{CombineResult, combine};
pub use plan::{PageCountLookup, PageInstruction, Plan, PlanBuilder};
pub use range::PageRange;

/// Version of the pdfcombine library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the pdfcombine library.
pub const NAME: &str = env!("CARGO_PKG_NAME");
