//! End-to-end verification over real temporary corpora

use linkgraph_core::ScanConfig;
use linkgraph_verify::{Issue, verify};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_clean_corpus_passes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "README.md", b"[guide](./docs/guide.md)");
    write(temp.path(), "docs/guide.md", b"[home](../README.md#top) [web](https://example.com)");

    let report = verify(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

    assert!(report.passed());
    assert_eq!(report.documents_scanned, 2);
    assert_eq!(report.references_checked, 2);
}

#[test]
fn test_shared_missing_target() {
    let temp = TempDir::new().unwrap();
    for name in ["a.md", "b.md", "c.md", "d.md", "e.md"] {
        write(temp.path(), name, b"Intro\n[gone](./missing.md)\n");
    }

    let report = verify(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

    assert_eq!(report.issues.len(), 5);
    assert_eq!(report.cache.probes, 1);
    assert_eq!(report.cache.lookups, 5);
    assert!(report.issues.iter().all(|issue| matches!(
        issue,
        Issue::BrokenLink { line: 2, target, .. } if target == "./missing.md"
    )));
}

#[test]
fn test_unreadable_document_is_reported() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.md", &[0xc3, 0x28, 0xff]);
    write(temp.path(), "good.md", b"plain");

    let report = verify(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();

    assert!(!report.passed());
    assert_eq!(report.issues.len(), 1);
    assert!(matches!(
        &report.issues[0],
        Issue::UnreadableDocument { file, .. } if file.as_str() == "bad.md"
    ));
    assert_eq!(report.unreadable_documents().count(), 1);
}

#[test]
fn test_existing_outside_and_missing_outside() {
    let outside = TempDir::new().unwrap();
    write(outside.path(), "exists.md", b"");

    let temp = TempDir::new().unwrap();
    let content = format!(
        "[a]({}) [b]({})",
        outside.path().join("exists.md").display(),
        outside.path().join("absent.md").display()
    );
    write(temp.path(), "a.md", content.as_bytes());

    let report = verify(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();
    assert!(report.passed());
    assert_eq!(report.cache.lookups, 0);
}

#[test]
fn test_code_examples_are_not_checked() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "a.md",
        b"```markdown\n[example](./not-real.md)\n```\n\nUse `[x](./also-not.md)` syntax.\n",
    );

    let report = verify(ScanConfig::builder(temp.path()).build().unwrap()).unwrap();
    assert!(report.passed());
    assert_eq!(report.references_checked, 0);
}

#[test]
fn test_missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let err = ScanConfig::builder(temp.path().join("nope")).build().unwrap_err();
    assert!(err.is_fatal());
}
