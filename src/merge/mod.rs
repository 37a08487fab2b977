//! Combining pages into a new document.
//!
//! This module provides:
//! - Page resolution, rotation and deep copying ([`pages`])
//! - Building a new document from a plan ([`assembler`])
//! - The end-to-end load, plan, assemble and write pipeline ([`combiner`])
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::config::Config;
//! use pdfcombine::input::InputSpec;
//! use pdfcombine::merge::combine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(
//!     vec![InputSpec::new("a.pdf"), InputSpec::new("b.pdf")],
//!     "combined.pdf",
//! );
//!
//! let result = combine(&config).await?;
//! println!("Combined {} pages", result.statistics.output_pages);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod combiner;
pub mod pages;

pub use assembler::{AssembledDocument, AssemblyStatistics, PlanAssembler};
pub use combiner::{CombineResult, CombineStatistics, Combiner};

use crate::config::Config;
use crate::error::Result;

/// Combine the inputs described by `config`.
///
/// Convenience function that creates a [`Combiner`] and runs it.
///
/// # Errors
///
/// Returns an error if any step fails; nothing is written in that case.
pub async fn combine(config: &Config) -> Result<CombineResult> {
    Combiner::new().combine(config).await
}
