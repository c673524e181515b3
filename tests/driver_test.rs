use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use download_books::{BookFormat, Config, DownloadError, RunSummary};
use download_books::driver::run;

const LISTING_PAGE: &str = r#"
<html><body>
  <ol class="content-item-list">
    <li><a class="title" href="/book/111">COVID: A Primer</a></li>
    <li><a class="title" href="/book/222">Vaccines/2021</a></li>
  </ol>
</body></html>
"#;

fn config(base_url: &str, folder: &std::path::Path, start_page: u32, end_page: u32) -> Config {
    Config {
        base_url: base_url.to_string(),
        folder: folder.to_path_buf(),
        overwrite: false,
        format: BookFormat::Pdf,
        start_page,
        end_page,
    }
}

fn no_interrupt() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[test]
fn test_run_downloads_every_book_on_a_page() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/search/page/1")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(LISTING_PAGE)
        .create();
    server
        .mock("GET", "/content/pdf/111.pdf")
        .with_status(200)
        .with_body("first book bytes")
        .create();
    server
        .mock("GET", "/content/pdf/222.pdf")
        .with_status(200)
        .with_body("second book bytes")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let summary = run(&config(&server.url(), dir.path(), 1, 1), no_interrupt()).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            downloaded: 2,
            skipped: 0,
            failed: 0
        }
    );
    assert_eq!(
        fs::read(dir.path().join("COVID A Primer.pdf")).unwrap(),
        b"first book bytes"
    );
    assert_eq!(
        fs::read(dir.path().join("Vaccines2021.pdf")).unwrap(),
        b"second book bytes"
    );
}

#[test]
fn test_run_skips_failed_page_and_continues() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/search/page/1")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create();
    server
        .mock("GET", "/search/page/2")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"<html><body><a class="title" href="/book/333">Solo</a></body></html>"#)
        .create();
    server
        .mock("GET", "/content/pdf/333.pdf")
        .with_status(200)
        .with_body("solo bytes")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let summary = run(&config(&server.url(), dir.path(), 1, 2), no_interrupt()).unwrap();

    assert_eq!(summary.downloaded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(fs::read(dir.path().join("Solo.pdf")).unwrap(), b"solo bytes");
}

#[test]
fn test_run_continues_past_a_failed_book() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/search/page/1")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(LISTING_PAGE)
        .create();
    server
        .mock("GET", "/content/pdf/111.pdf")
        .with_status(404)
        .create();
    server
        .mock("GET", "/content/pdf/222.pdf")
        .with_status(200)
        .with_body("second book bytes")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let summary = run(&config(&server.url(), dir.path(), 1, 1), no_interrupt()).unwrap();

    assert_eq!(summary.downloaded, 1);
    assert_eq!(summary.failed, 1);
    assert!(!dir.path().join("COVID A Primer.pdf").exists());
    assert_eq!(
        fs::read(dir.path().join("Vaccines2021.pdf")).unwrap(),
        b"second book bytes"
    );
}

#[test]
fn test_second_run_skips_files_already_on_disk() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/search/page/1")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(LISTING_PAGE)
        .create();
    let first = server
        .mock("GET", "/content/pdf/111.pdf")
        .with_status(200)
        .with_body("first book bytes")
        .expect(1)
        .create();
    let second = server
        .mock("GET", "/content/pdf/222.pdf")
        .with_status(200)
        .with_body("second book bytes")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&server.url(), dir.path(), 1, 1);

    let summary = run(&cfg, no_interrupt()).unwrap();
    assert_eq!(summary.downloaded, 2);

    let summary = run(&cfg, no_interrupt()).unwrap();
    assert_eq!(summary.downloaded, 0);
    assert_eq!(summary.skipped, 2);

    // One network call per book across both runs
    first.assert();
    second.assert();
}

#[test]
fn test_interrupt_removes_partial_file_and_aborts_run() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/search/page/1")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(LISTING_PAGE)
        .create();
    server
        .mock("GET", "/content/pdf/111.pdf")
        .with_status(200)
        .with_body("never finished")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let interrupted = Arc::new(AtomicBool::new(true));

    let result = run(&config(&server.url(), dir.path(), 1, 1), interrupted);

    assert!(matches!(result, Err(DownloadError::Interrupted)));
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}
