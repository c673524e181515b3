use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum DownloadError {
    RequestFailed(reqwest::Error),
    IoError(std::io::Error),
    SelectorError(String),
    AttributeNotFound(String),
    Interrupted,
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::RequestFailed(e) => write!(f, "Failed to make HTTP request: {}", e),
            DownloadError::IoError(e) => write!(f, "IO operation failed: {}", e),
            DownloadError::SelectorError(msg) => write!(f, "Invalid CSS selector: {}", msg),
            DownloadError::AttributeNotFound(msg) => write!(f, "Attribute not found: {}", msg),
            DownloadError::Interrupted => write!(f, "Download interrupted by user"),
        }
    }
}

impl Error for DownloadError {}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::RequestFailed(err)
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::IoError(err)
    }
}
