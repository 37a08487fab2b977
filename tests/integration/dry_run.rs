//! Integration tests for dry-run functionality.

use pdfcombine::combine;
use pdfcombine::output::plan_to_json;
use tempfile::TempDir;

use crate::common::{config_from_args, write_pdf};

#[tokio::test]
async fn test_dry_run_does_not_create_output() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 3);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        "--dry-run",
        "-o",
        out.to_str().unwrap(),
        foo.to_str().unwrap(),
        "--remove",
        "2",
    ])
    .unwrap();

    let result = combine(&config).await.unwrap();
    assert!(result.written.is_none());
    assert!(!out.exists(), "dry run must not write output");

    let indices: Vec<usize> = result.plan.iter().map(|p| p.page_index).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[tokio::test]
async fn test_dry_run_ignores_existing_output() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 1);
    let out = dir.path().join("out.pdf");
    std::fs::write(&out, b"existing").unwrap();

    let config =
        config_from_args(&["-n", "-o", out.to_str().unwrap(), foo.to_str().unwrap()]).unwrap();

    combine(&config).await.unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"existing");
}

#[tokio::test]
async fn test_dry_run_json_plan() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 2);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        "-n",
        "--json",
        "-o",
        out.to_str().unwrap(),
        foo.to_str().unwrap(),
        "-k",
        "2",
        "-a",
        "270",
    ])
    .unwrap();
    assert!(!config.should_print());

    let result = combine(&config).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&plan_to_json(&result.plan).unwrap()).unwrap();

    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["source"], foo.to_str().unwrap());
    assert_eq!(pages[0]["pageIndex"], 1);
    assert_eq!(pages[0]["rotation"], 270);
}

#[tokio::test]
async fn test_dry_run_shows_empty_plan() {
    let dir = TempDir::new().unwrap();
    let foo = write_pdf(dir.path(), "foo.pdf", 5);
    let out = dir.path().join("out.pdf");

    let config = config_from_args(&[
        "-n",
        "-o",
        out.to_str().unwrap(),
        foo.to_str().unwrap(),
        "--remove",
        "1-5",
    ])
    .unwrap();

    let result = combine(&config).await.unwrap();
    assert!(result.plan.is_empty());
    assert!(plan_to_json(&result.plan).unwrap().contains("\"pages\": []"));
    assert!(!out.exists());
}
