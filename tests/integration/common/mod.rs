//! Shared helpers for the integration tests.
//!
//! Test documents are generated on the fly; page `n` of a document labelled
//! `foo` draws the text `(foo-n)`, which [`page_labels`] reads back.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

/// Write a `pages`-page PDF labelled after `name` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let label = name.trim_end_matches(".pdf");
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = format!("BT /F1 12 Tf 72 720 Td ({label}-{n}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("failed to write test PDF");
    path
}

/// Labels of the pages of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("failed to load output");
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).expect("page has no content");
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').expect("no label") + 1;
            let end = text.find(')').expect("no label");
            text[start..end].to_string()
        })
        .collect()
}

/// `/Rotate` of every page of the PDF at `path`, 0 when absent.
pub fn page_rotations(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("failed to load output");
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .ok()
                .and_then(|page| page.get(b"Rotate").ok())
                .and_then(|rotate| rotate.as_i64().ok())
                .unwrap_or(0)
        })
        .collect()
}

/// Parse a command line (without the program name) into a validated config.
pub fn config_from_args(args: &[&str]) -> pdfcombine::Result<pdfcombine::Config> {
    use clap::Parser;

    let argv = std::iter::once("pdfcombine").chain(args.iter().copied());
    let cli = pdfcombine::cli::Cli::try_parse_from(argv).expect("clap rejected arguments");
    pdfcombine::Config::try_from(&cli)
}
