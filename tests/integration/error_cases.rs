//! Integration tests for error handling.

use pdfcombine::{PdfCombineError, combine};
use tempfile::TempDir;

use crate::common::{config_from_args, write_pdf};

#[tokio::test]
async fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");
    let out = dir.path().join("out.pdf");

    let config =
        config_from_args(&[missing.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
    let err = combine(&config).await.unwrap_err();

    assert!(matches!(err, PdfCombineError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_corrupted_input() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"this is not a pdf").unwrap();
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[bad.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
    let err = combine(&config).await.unwrap_err();

    assert!(matches!(err, PdfCombineError::UnreadablePdf { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_existing_output_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 1);
    let out = dir.path().join("out.pdf");
    std::fs::write(&out, b"precious").unwrap();

    let config = config_from_args(&[foo.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
    let err = combine(&config).await.unwrap_err();

    assert!(matches!(err, PdfCombineError::OutputExists { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(std::fs::read(&out).unwrap(), b"precious");
}

#[tokio::test]
async fn test_page_out_of_range_names_file() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 3);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        foo.to_str().unwrap(),
        "--keep",
        "1,5",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();
    let err = combine(&config).await.unwrap_err();

    assert!(matches!(err, PdfCombineError::PageOutOfRange { page: 5, total_pages: 3, .. }));
    assert!(err.to_string().contains("foo.pdf"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_everything_removed_is_empty_plan() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 2);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        foo.to_str().unwrap(),
        "--remove",
        "1-2",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();
    let err = combine(&config).await.unwrap_err();

    assert!(matches!(err, PdfCombineError::EmptyPlan));
    assert!(!out.exists());
}

#[test]
fn test_argument_errors() {
    let err = config_from_args(&["foo.pdf", "--keep", "3-1"]).unwrap_err();
    assert!(matches!(err, PdfCombineError::InvalidInput { .. }));
    assert!(err.to_string().contains("foo.pdf"));
    assert!(err.to_string().contains("--keep"));

    let err = config_from_args(&["foo.pdf", "--angle", "45"]).unwrap_err();
    assert_eq!(err.exit_code(), 1);

    let result = config_from_args(&["foo.pdf", "--keep", "1", "--remove", "2"]);
    assert!(result.is_ok(), "conflict is reported when the plan is built");

    let err = config_from_args(&["foo.pdf", "--pages", "1"]).unwrap_err();
    assert!(matches!(err, PdfCombineError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_keep_and_remove_on_one_input() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 3);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        foo.to_str().unwrap(),
        "--keep",
        "1",
        "--remove",
        "2",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let err = combine(&config).await.unwrap_err();
    assert!(matches!(err, PdfCombineError::InvalidMode { .. }));
}
