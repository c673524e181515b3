// Expose modules for integration testing
pub mod book;
pub mod downloader;
pub mod driver;
pub mod error;
pub mod format;
pub mod listing;

// Re-export important types for easier use in tests
pub use book::Book;
pub use downloader::{BookDownloader, DownloadOutcome};
pub use driver::{Config, RunSummary};
pub use error::DownloadError;
pub use format::BookFormat;
