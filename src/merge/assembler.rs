//! Builds the combined document from a plan.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::error::{PdfCombineError, Result};
use crate::io::LoadedDocuments;
use crate::merge::pages::{ObjectCopier, apply_rotation, resolve_page};
use crate::plan::Plan;

/// PDF version used when no source declares a newer one.
const MIN_VERSION: &str = "1.5";

/// Statistics about an assembly.
#[derive(Debug, Clone, Default)]
pub struct AssemblyStatistics {
    /// Pages in the combined document.
    pub pages: usize,

    /// Distinct source documents pages were taken from.
    pub sources: usize,

    /// Objects copied from the sources, pages excluded.
    pub objects_copied: usize,
}

/// The combined document, ready to be written.
#[derive(Debug)]
pub struct AssembledDocument {
    /// The combined PDF document.
    pub document: Document,

    /// Statistics about the assembly.
    pub statistics: AssemblyStatistics,
}

/// Turns a [`Plan`] into a new document.
///
/// Every planned page becomes a fresh page object in a single flat page
/// tree, in plan order. A page listed twice is copied twice; the objects
/// it references (content streams, fonts, images) are shared between the
/// copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanAssembler;

impl PlanAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the plan's pages out of `documents`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::AssemblyFailed`] if a planned source was
    /// not loaded, a page index is past the end of its source, or a page
    /// object cannot be read.
    pub fn assemble(&self, plan: &Plan, documents: &LoadedDocuments) -> Result<AssembledDocument> {
        let mut target = Document::with_version(target_version(plan, documents));
        let pages_id = target.new_object_id();

        let mut copiers: HashMap<&Path, ObjectCopier<'_>> = HashMap::new();
        let mut page_tables: HashMap<&Path, Vec<ObjectId>> = HashMap::new();
        let mut kids = Vec::with_capacity(plan.len());

        for instruction in plan {
            let path = instruction.source.as_path();
            let loaded = documents.get(path).ok_or_else(|| {
                PdfCombineError::assembly_failed(format!(
                    "source {} was not loaded",
                    path.display()
                ))
            })?;

            let page_ids = page_tables
                .entry(path)
                .or_insert_with(|| loaded.document.get_pages().into_values().collect());
            let &source_page = page_ids.get(instruction.page_index).ok_or_else(|| {
                PdfCombineError::assembly_failed(format!(
                    "page {} of {} does not exist",
                    instruction.page_index + 1,
                    path.display()
                ))
            })?;

            let copier = copiers
                .entry(path)
                .or_insert_with(|| ObjectCopier::new(&loaded.document));

            let mut page = resolve_page(copier.source(), source_page)?;
            page.remove(b"Parent");
            apply_rotation(copier.source(), &mut page, instruction.rotation);

            let mut page = copier.copy_dictionary(&page, &mut target);
            page.set("Parent", pages_id);
            let page_id = target.add_object(page);
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len();
        target.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }
            .into(),
        );

        let catalog_id = target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        target.trailer.set("Root", catalog_id);

        let statistics = AssemblyStatistics {
            pages: page_count,
            sources: copiers.len(),
            objects_copied: copiers.values().map(ObjectCopier::copied).sum(),
        };
        debug!(
            pages = statistics.pages,
            sources = statistics.sources,
            objects = statistics.objects_copied,
            "assembled combined document"
        );

        Ok(AssembledDocument {
            document: target,
            statistics,
        })
    }
}

/// Highest PDF version among the plan's sources, at least [`MIN_VERSION`].
fn target_version(plan: &Plan, documents: &LoadedDocuments) -> String {
    plan.sources()
        .into_iter()
        .filter_map(|path| documents.get(path))
        .map(|loaded| loaded.document.version.as_str())
        .chain(std::iter::once(MIN_VERSION))
        .max()
        .unwrap_or(MIN_VERSION)
        .to_string()
}
