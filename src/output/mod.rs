//! Output formatting and display for pdfcombine.
//!
//! This module handles all user-facing output:
//! - Status messages in quiet and verbose modes
//! - The dry-run plan preview, as text or JSON
//! - Summary statistics after a combine
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::output::OutputFormatter;
//! use pdfcombine::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Combining 2 input(s)");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::error::Result;
use crate::merge::CombineResult;
use crate::plan::{PageInstruction, Plan};

/// One human-readable line describing a planned page.
pub fn describe_instruction(instruction: &PageInstruction) -> String {
    let mut line = format!(
        "{} page {}",
        instruction.source.display(),
        instruction.page_index + 1
    );
    if !instruction.rotation.is_none() {
        line.push_str(&format!(" (rotated {})", instruction.rotation));
    }
    line
}

/// Display the resolved plan as a numbered list.
pub fn display_plan(formatter: &OutputFormatter, plan: &Plan) {
    formatter.section(&format!("Plan ({} page(s)):", plan.len()));
    for (index, instruction) in plan.iter().enumerate() {
        formatter.list_item(index + 1, &describe_instruction(instruction));
    }
}

/// Serialize the plan as pretty-printed JSON.
///
/// # Errors
///
/// Returns an I/O error if serialization fails.
pub fn plan_to_json(plan: &Plan) -> Result<String> {
    serde_json::to_string_pretty(plan).map_err(|e| std::io::Error::other(e).into())
}

/// Display statistics about a finished combine.
///
/// The summary line is shown unless quiet; the rest only in verbose mode.
pub fn display_combine_result(formatter: &OutputFormatter, result: &CombineResult) {
    let stats = &result.statistics;

    if formatter.is_verbose() {
        formatter.section("Statistics:");
        formatter.detail("Input files", &stats.files_loaded.to_string());
        formatter.detail("Input pages", &stats.input_pages.to_string());
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Output pages", &stats.output_pages.to_string());
        formatter.detail("Objects copied", &stats.objects_copied.to_string());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", stats.load_time.as_secs_f64()),
        );
        if let Some(written) = &result.written {
            formatter.detail("Output size", &written.format_file_size());
            formatter.detail(
                "Write time",
                &format!("{:.2}s", written.write_time.as_secs_f64()),
            );
        }
        formatter.detail(
            "Total time",
            &format!("{:.2}s", stats.total_time.as_secs_f64()),
        );
    }

    match &result.written {
        Some(written) => formatter.success(&format!(
            "Wrote {} page(s) from {} file(s) to {}",
            stats.output_pages,
            stats.files_loaded,
            written.output_path.display()
        )),
        None => formatter.info(&format!(
            "Dry run: {} page(s) from {} file(s), nothing written",
            stats.output_pages, stats.files_loaded
        )),
    }
}
