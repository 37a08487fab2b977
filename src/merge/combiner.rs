//! End-to-end combine operation.
//!
//! Loads the inputs, resolves the page plan, and (unless this is a dry run)
//! assembles and writes the combined document.

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::Config;
use crate::error::{PdfCombineError, Result};
use crate::io::{LoadedDocuments, PdfReader, PdfWriter, WriteStatistics};
use crate::merge::assembler::PlanAssembler;
use crate::plan::{Plan, PlanBuilder};
use crate::utils::format_file_size;

/// Statistics about a combine operation.
#[derive(Debug, Clone, Default)]
pub struct CombineStatistics {
    /// Number of distinct input files loaded.
    pub files_loaded: usize,

    /// Total pages across the loaded inputs.
    pub input_pages: usize,

    /// Pages in the combined document.
    pub output_pages: usize,

    /// Total size of the loaded inputs.
    pub input_size: u64,

    /// Objects copied from the inputs into the output.
    pub objects_copied: usize,

    /// Time taken to load the inputs.
    pub load_time: Duration,

    /// Time taken for the whole operation.
    pub total_time: Duration,
}

impl CombineStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a combine operation.
#[derive(Debug, Clone)]
pub struct CombineResult {
    /// The resolved page plan.
    pub plan: Plan,

    /// Statistics about the operation.
    pub statistics: CombineStatistics,

    /// Write statistics; `None` for a dry run.
    pub written: Option<WriteStatistics>,
}

/// Drives loading, planning, assembly and writing.
#[derive(Debug, Clone, Default)]
pub struct Combiner {
    reader: PdfReader,
    builder: PlanBuilder,
    assembler: PlanAssembler,
    writer: PdfWriter,
}

impl Combiner {
    /// Create a combiner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom writer.
    pub fn with_writer(mut self, writer: PdfWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Load every input and resolve the page plan.
    ///
    /// # Errors
    ///
    /// Returns the first load error, or any plan error.
    pub async fn plan(&self, config: &Config) -> Result<(Plan, LoadedDocuments)> {
        let documents = self
            .reader
            .load_all(config.inputs().iter().map(|spec| spec.path()))
            .await?;

        let plan = self.builder.build(config.inputs(), &documents)?;
        Ok((plan, documents))
    }

    /// Run the whole operation described by `config`.
    ///
    /// Nothing is written unless the plan resolves and assembles cleanly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The output exists and overwriting is not allowed
    /// - An input cannot be loaded
    /// - The plan cannot be resolved, or selects no pages outside a dry run
    /// - Assembly or the write fails
    pub async fn combine(&self, config: &Config) -> Result<CombineResult> {
        let start = Instant::now();
        config.validate()?;

        if !config.dry_run {
            PdfWriter::check_output(&config.output, config.overwrite_mode)?;
        }

        let (plan, documents) = self.plan(config).await?;
        let loads = documents.statistics();

        let mut statistics = CombineStatistics {
            files_loaded: loads.files_loaded,
            input_pages: loads.total_pages,
            output_pages: plan.len(),
            input_size: loads.total_size,
            load_time: loads.total_time,
            ..Default::default()
        };

        info!(
            inputs = statistics.files_loaded,
            pages = statistics.output_pages,
            "plan resolved"
        );

        if config.dry_run {
            statistics.total_time = start.elapsed();
            return Ok(CombineResult {
                plan,
                statistics,
                written: None,
            });
        }

        if plan.is_empty() {
            return Err(PdfCombineError::EmptyPlan);
        }

        let assembled = self.assembler.assemble(&plan, &documents)?;
        drop(documents);
        statistics.objects_copied = assembled.statistics.objects_copied;

        let written = self
            .writer
            .save(assembled.document, &config.output)
            .await?;
        statistics.total_time = start.elapsed();

        info!(
            output = %written.output_path.display(),
            size = %written.format_file_size(),
            "combined document written"
        );

        Ok(CombineResult {
            plan,
            statistics,
            written: Some(written),
        })
    }
}
