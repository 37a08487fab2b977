//! Page plan construction.
//!
//! The plan is the fully resolved, ordered list of pages the combined
//! document will contain. Building it needs only each input's page count,
//! which is supplied through [`PageCountLookup`] so the builder never opens
//! a file itself.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::Rotation;
use crate::error::{PdfCombineError, Result};
use crate::input::{InputSpec, Selection};
use crate::range::PageRange;

/// Source of page counts for input files.
pub trait PageCountLookup {
    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<usize>;
}

impl PageCountLookup for HashMap<PathBuf, usize> {
    fn page_count(&self, path: &Path) -> Result<usize> {
        self.get(path)
            .copied()
            .ok_or_else(|| PdfCombineError::file_not_found(path.to_path_buf()))
    }
}

/// One page of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInstruction {
    /// File the page is taken from.
    pub source: PathBuf,
    /// 0-based index of the page in the source file.
    pub page_index: usize,
    /// Rotation added to the page's own orientation.
    pub rotation: Rotation,
}

/// Ordered page instructions; this order is the output page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pages: Vec<PageInstruction>,
}

impl Plan {
    /// Wrap an already resolved instruction list.
    pub fn from_instructions(pages: Vec<PageInstruction>) -> Self {
        Self { pages }
    }

    /// Number of pages in the output.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the plan selects no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over the instructions in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageInstruction> {
        self.pages.iter()
    }

    /// The instructions in output order.
    pub fn instructions(&self) -> &[PageInstruction] {
        &self.pages
    }

    /// Consume the plan, returning its instructions.
    pub fn into_instructions(self) -> Vec<PageInstruction> {
        self.pages
    }

    /// Distinct source files, in order of first use.
    pub fn sources(&self) -> Vec<&Path> {
        let mut sources: Vec<&Path> = Vec::new();
        for page in &self.pages {
            if !sources.contains(&page.source.as_path()) {
                sources.push(&page.source);
            }
        }
        sources
    }

    /// Number of output pages taken from `path`.
    pub fn pages_from(&self, path: &Path) -> usize {
        self.pages.iter().filter(|p| p.source == path).count()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PageInstruction;
    type IntoIter = std::slice::Iter<'a, PageInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Builds a [`Plan`] from input groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanBuilder;

impl PlanBuilder {
    /// Create a new plan builder.
    pub fn new() -> Self {
        Self
    }

    /// Resolve every input's selection against its page count.
    ///
    /// Inputs are processed in order and their pages appended, so the plan
    /// is the concatenation of the per-input selections. The plan may be
    /// empty, for example when every page of every input is removed.
    ///
    /// # Errors
    ///
    /// - [`PdfCombineError::InvalidMode`] if an input has both a keep and a
    ///   remove range.
    /// - [`PdfCombineError::PageOutOfRange`] if a keep or remove range names
    ///   a page past the end of its file.
    /// - Any error from `lookup`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::{HashMap, HashSet};
    /// use std::path::PathBuf;
    /// use pdfcombine::input::InputSpec;
    /// use pdfcombine::plan::PlanBuilder;
    /// use pdfcombine::range::PageRange;
    ///
    /// let counts = HashMap::from([(PathBuf::from("foo.pdf"), 5)]);
    /// let spec = InputSpec::new("foo.pdf").with_remove(PageRange::parse("1-2").unwrap());
    ///
    /// let plan = PlanBuilder::new().build(&[spec], &counts).unwrap();
    /// let indices: Vec<usize> = plan.iter().map(|p| p.page_index).collect();
    /// assert_eq!(indices, vec![2, 3, 4]);
    /// ```
    pub fn build<L>(&self, specs: &[InputSpec], lookup: &L) -> Result<Plan>
    where
        L: PageCountLookup + ?Sized,
    {
        let mut pages = Vec::new();

        for spec in specs {
            let selection = spec.selection()?;
            let total_pages = lookup.page_count(spec.path())?;
            let selected = select_pages(spec.path(), selection, total_pages)?;

            debug!(
                path = %spec.path().display(),
                total_pages,
                selected = selected.len(),
                rotation = spec.rotation().degrees(),
                "resolved input"
            );

            pages.extend(selected.into_iter().map(|page| PageInstruction {
                source: spec.path().to_path_buf(),
                page_index: page as usize - 1,
                rotation: spec.rotation(),
            }));
        }

        Ok(Plan { pages })
    }
}

/// Compute the selected 1-based page numbers for one input.
fn select_pages(path: &Path, selection: Selection<'_>, total_pages: usize) -> Result<Vec<u32>> {
    match selection {
        Selection::All => Ok(all_pages(total_pages).collect()),
        Selection::Keep(range) => {
            check_bounds(path, range, total_pages)?;
            Ok(range.pages())
        }
        Selection::Remove(range) => {
            check_bounds(path, range, total_pages)?;
            let removed: HashSet<u32> = range.iter().collect();
            Ok(all_pages(total_pages)
                .filter(|page| !removed.contains(page))
                .collect())
        }
    }
}

fn all_pages(total_pages: usize) -> impl Iterator<Item = u32> {
    (1..=total_pages).map(|page| page as u32)
}

/// Every page in `range` must exist in a document of `total_pages` pages.
///
/// Works on the interval ends, so nothing is expanded before the range is
/// known to fit.
fn check_bounds(path: &Path, range: &PageRange, total_pages: usize) -> Result<()> {
    let first_past_end = range
        .terms()
        .iter()
        .find(|&&(_, end)| end as usize > total_pages)
        .map(|&(start, _)| (start as usize).max(total_pages + 1) as u32);

    match first_past_end {
        Some(page) => Err(PdfCombineError::PageOutOfRange {
            path: path.to_path_buf(),
            page,
            total_pages,
            range: range.to_string(),
        }),
        None => Ok(()),
    }
}
