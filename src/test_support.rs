//! In-memory PDF builders for unit tests.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Build a document with `pages` pages labelled `page-1`, `page-2`, ...
pub(crate) fn build_test_document(pages: usize) -> Document {
    build_labeled_document("page", pages)
}

/// Build a document whose page `n` draws the text `({label}-{n})`.
///
/// `Resources` and `MediaBox` live on the root `Pages` node, so every page
/// inherits them.
pub(crate) fn build_labeled_document(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a labelled test document to `dir/name` and return its path.
pub(crate) fn write_test_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let label = name.trim_end_matches(".pdf");
    let path = dir.join(name);
    let mut doc = build_labeled_document(label, pages);
    doc.save(&path).unwrap();
    path
}

/// The text drawn by a page, as produced by [`build_labeled_document`].
pub(crate) fn page_label(doc: &Document, page_id: ObjectId) -> String {
    let content = doc.get_page_content(page_id).unwrap();
    let text = String::from_utf8_lossy(&content);
    let start = text.find('(').unwrap() + 1;
    let end = text.find(')').unwrap();
    text[start..end].to_string()
}
