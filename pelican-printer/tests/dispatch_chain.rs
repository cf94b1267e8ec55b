//! Dispatch chain integration tests
//!
//! Drives the PDF pipeline against fake tool executables so the full
//! fallback ladder can be exercised without Chrome or SumatraPDF
//! installed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pelican_printer::{DispatchOutcome, LabelDispatch, PdfPipeline};
use tempfile::TempDir;

/// Write an executable shell script into `dir`.
fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

/// A renderer that honors `--print-to-pdf=<path>` like headless Chrome.
fn fake_renderer(dir: &Path) -> PathBuf {
    fake_tool(
        dir,
        "fake-chrome",
        r#"out=""
for a in "$@"; do
  case "$a" in
    --print-to-pdf=*) out="${a#--print-to-pdf=}" ;;
  esac
done
[ -n "$out" ] || exit 1
printf '%%PDF-1.4 fake' > "$out""#,
    )
}

fn artifact(dir: &Path) -> PathBuf {
    let path = dir.join("order-7-1700000000000.html");
    fs::write(&path, "<html><body>label</body></html>").unwrap();
    path
}

#[tokio::test]
async fn test_full_chain_auto_prints_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let renderer = fake_renderer(dir.path());
    let printer = fake_tool(dir.path(), "fake-sumatra", "touch \"$0.ran\"");
    let html = artifact(dir.path());

    let pipeline = PdfPipeline::with_tools(Some(renderer), Some(printer.clone()));
    let outcome = pipeline.dispatch(&html).await;

    assert_eq!(outcome, DispatchOutcome::AutoPrinted);
    // The silent printer was actually invoked
    assert!(printer.with_extension("ran").exists());
    // Intermediate PDF is cleaned up after a successful silent print
    assert!(!html.with_extension("pdf").exists());
}

#[tokio::test]
async fn test_missing_silent_printer_opens_pdf() {
    let dir = TempDir::new().unwrap();
    let renderer = fake_renderer(dir.path());
    let html = artifact(dir.path());

    let pipeline = PdfPipeline::with_tools(Some(renderer), None);
    let outcome = pipeline.dispatch(&html).await;

    let pdf = html.with_extension("pdf");
    assert_eq!(outcome, DispatchOutcome::OpenedForManual { target: pdf.clone() });
    // The PDF is retained for the viewer
    assert!(pdf.exists());
}

#[tokio::test]
async fn test_failed_silent_print_opens_pdf() {
    let dir = TempDir::new().unwrap();
    let renderer = fake_renderer(dir.path());
    let printer = fake_tool(dir.path(), "fake-sumatra", "exit 3");
    let html = artifact(dir.path());

    let pipeline = PdfPipeline::with_tools(Some(renderer), Some(printer));
    let outcome = pipeline.dispatch(&html).await;

    assert_eq!(
        outcome,
        DispatchOutcome::OpenedForManual {
            target: html.with_extension("pdf")
        }
    );
}

#[tokio::test]
async fn test_failed_renderer_opens_original_artifact() {
    let dir = TempDir::new().unwrap();
    let renderer = fake_tool(dir.path(), "fake-chrome", "exit 1");
    let html = artifact(dir.path());

    let pipeline = PdfPipeline::with_tools(Some(renderer), None);
    let outcome = pipeline.dispatch(&html).await;

    assert_eq!(
        outcome,
        DispatchOutcome::OpenedForManual {
            target: html.clone()
        }
    );
    // No partial PDF left behind
    assert!(!html.with_extension("pdf").exists());
}

#[tokio::test]
async fn test_missing_renderer_opens_original_artifact() {
    let dir = TempDir::new().unwrap();
    let html = artifact(dir.path());

    let pipeline = PdfPipeline::with_tools(None, None);
    let outcome = pipeline.dispatch(&html).await;

    assert_eq!(
        outcome,
        DispatchOutcome::OpenedForManual {
            target: html.clone()
        }
    );
}
