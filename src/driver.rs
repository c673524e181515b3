use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;

use crate::downloader::{BookDownloader, DownloadOutcome};
use crate::error::DownloadError;
use crate::format::BookFormat;
use crate::listing::{extract_books, fetch_listing_page};

/// Everything the crawl needs, injectable so tests can point it at a local
/// server and a scratch directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub folder: PathBuf,
    pub overwrite: bool,
    pub format: BookFormat,
    pub start_page: u32,
    pub end_page: u32,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Crawls the configured page range: fetch listing, extract books, download
/// each one that is not already on disk.
///
/// A page that fails to fetch is skipped. A book whose download fails is
/// reported and the run moves on to the next book. An interrupt aborts the
/// whole run after removing the in-flight partial file; files completed
/// before the interrupt are kept.
pub fn run(config: &Config, interrupted: Arc<AtomicBool>) -> Result<RunSummary, DownloadError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    let downloader = BookDownloader::new(&config.folder, config.overwrite, interrupted)?;
    let mut summary = RunSummary::default();

    for page_number in config.start_page..=config.end_page {
        let Some(page) = fetch_listing_page(&client, &config.base_url, page_number)? else {
            continue;
        };

        let books = extract_books(&page, config.format)?;
        info!("Found {} books on page {}", books.len(), page_number);

        for book in &books {
            match downloader.get(&client, &config.base_url, book) {
                Ok(DownloadOutcome::Downloaded) => summary.downloaded += 1,
                Ok(DownloadOutcome::Skipped) => summary.skipped += 1,
                Err(DownloadError::Interrupted) => {
                    eprintln!("(!) Interrupted, cleaning up...");
                    if let Err(e) = downloader.flush_unfinished(book) {
                        warn!("Failed to remove partial file for {}: {}", book.title(), e);
                    }
                    return Err(DownloadError::Interrupted);
                }
                Err(e) => {
                    eprintln!("Failed to download <<{}>>: {}", book.title(), e);
                    summary.failed += 1;
                }
            }
        }
    }

    if summary.failed > 0 {
        println!("Warning: {} books failed to download", summary.failed);
    }

    Ok(summary)
}
