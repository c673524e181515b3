use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

mod book;
mod downloader;
mod driver;
mod error;
mod format;
mod listing;

use driver::{Config, run};
use error::DownloadError;
use format::BookFormat;

/// Download books from the Springer COVID-19 textbook listing
#[derive(Debug, Parser)]
#[command(version, about, long_about = "Download books from the Springer COVID-19 textbook listing")]
pub struct Args {
    /// The output directory for downloaded books
    #[arg(short, long, default_value = "books")]
    pub output_dir: PathBuf,

    /// Redownload and replace files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// File format to download
    #[arg(short, long, value_enum, default_value_t = BookFormat::Pdf)]
    pub format: BookFormat,

    /// First listing page to crawl
    #[arg(long, default_value_t = 1)]
    pub start_page: u32,

    /// Last listing page to crawl (inclusive)
    #[arg(long, default_value_t = 24)]
    pub end_page: u32,

    /// Base URL of the book listing site
    #[arg(long, default_value = "https://link.springer.com")]
    pub base_url: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        base_url: args.base_url,
        folder: args.output_dir,
        overwrite: args.overwrite,
        format: args.format,
        start_page: args.start_page,
        end_page: args.end_page,
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        eprintln!("Failed to install interrupt handler: {}", e);
        process::exit(1);
    }

    match run(&config, interrupted) {
        Ok(summary) => {
            println!(
                "Done: {} downloaded, {} skipped, {} failed",
                summary.downloaded, summary.skipped, summary.failed
            );
        }
        Err(DownloadError::Interrupted) => {
            eprintln!("(!) Exit forced");
            process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
