//! The default output lands in the current directory.

use pdfcombine::{PdfCombineError, combine};
use serial_test::serial;
use tempfile::TempDir;

use crate::common::{config_from_args, page_labels, write_pdf};

/// Runs `f` with the current directory set to `dir`, restoring it after.
async fn in_dir<F, Fut, T>(dir: &std::path::Path, f: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    let result = f().await;
    std::env::set_current_dir(previous).unwrap();
    result
}

#[tokio::test]
#[serial]
async fn test_writes_combined_pdf_by_default() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "a.pdf", 2);
    write_pdf(dir.path(), "b.pdf", 1);

    let result = in_dir(dir.path(), || async {
        let config = config_from_args(&["a.pdf", "b.pdf", "-k", "1"]).unwrap();
        combine(&config).await
    })
    .await;

    assert!(result.is_ok());
    assert_eq!(
        page_labels(&dir.path().join("combined.pdf")),
        vec!["a-1", "a-2", "b-1"]
    );
}

#[tokio::test]
#[serial]
async fn test_default_output_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "a.pdf", 1);
    std::fs::write(dir.path().join("combined.pdf"), b"earlier run").unwrap();

    let result = in_dir(dir.path(), || async {
        let config = config_from_args(&["a.pdf"]).unwrap();
        combine(&config).await
    })
    .await;

    assert!(matches!(result, Err(PdfCombineError::OutputExists { .. })));
}
