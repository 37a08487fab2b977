//! End-to-end combine tests.

use pdfcombine::combine;
use tempfile::TempDir;

use crate::common::{config_from_args, page_labels, page_rotations, write_pdf};

fn s(path: &std::path::Path) -> &str {
    path.to_str().unwrap()
}

#[tokio::test]
async fn test_keep_and_remove_across_files() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 3);
    let bar = write_pdf(dir.path(), "bar.pdf", 4);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        s(&foo),
        "--keep",
        "1-2",
        s(&bar),
        "--remove",
        "1-2",
        "-o",
        s(&out),
    ])
    .unwrap();

    let result = combine(&config).await.unwrap();
    assert_eq!(result.statistics.output_pages, 4);
    assert_eq!(page_labels(&out), vec!["foo-1", "foo-2", "bar-3", "bar-4"]);
}

#[tokio::test]
async fn test_plain_concatenation() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&["-o", s(&out), s(&a), s(&b)]).unwrap();
    combine(&config).await.unwrap();

    assert_eq!(page_labels(&out), vec!["a-1", "a-2", "b-1"]);
    assert_eq!(page_rotations(&out), vec![0, 0, 0]);
}

#[tokio::test]
async fn test_reorder_with_keep() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(dir.path(), "doc.pdf", 5);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[s(&doc), "-k", "5,1-2,2", "-o", s(&out)]).unwrap();
    combine(&config).await.unwrap();

    assert_eq!(page_labels(&out), vec!["doc-5", "doc-1", "doc-2"]);
}

#[tokio::test]
async fn test_rotation_applies_to_one_input() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 2);
    let bar = write_pdf(dir.path(), "bar.pdf", 1);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        s(&foo),
        "--keep",
        "1",
        "--angle",
        "90",
        s(&bar),
        "--angle=-90",
        "-o",
        s(&out),
    ])
    .unwrap();
    combine(&config).await.unwrap();

    assert_eq!(page_labels(&out), vec!["foo-1", "bar-1"]);
    assert_eq!(page_rotations(&out), vec![90, 270]);
}

#[tokio::test]
async fn test_same_file_used_twice() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(dir.path(), "doc.pdf", 3);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        s(&doc),
        "--keep",
        "3",
        s(&doc),
        "--keep",
        "3",
        "--angle",
        "180",
        "-o",
        s(&out),
    ])
    .unwrap();

    let result = combine(&config).await.unwrap();
    assert_eq!(result.statistics.files_loaded, 1);
    assert_eq!(page_labels(&out), vec!["doc-3", "doc-3"]);
    assert_eq!(page_rotations(&out), vec![0, 180]);
}

#[tokio::test]
async fn test_force_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let out = dir.path().join("out.pdf");
    std::fs::write(&out, b"stale").unwrap();

    let config = config_from_args(&["--force", "-o", s(&out), s(&a)]).unwrap();
    combine(&config).await.unwrap();

    assert_eq!(page_labels(&out), vec!["a-1"]);
}
