use clap::ValueEnum;

/// Supported download formats for a book.
///
/// Each format knows the URL path segment that replaces the `book/` marker in
/// a detail-page link, and the extension appended to the download URL and the
/// saved file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BookFormat {
    Pdf,
    Epub,
}

impl BookFormat {
    /// Path segment substituted for the `book/` marker in a detail-page href.
    pub fn url_modifier(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "content/pdf/",
            BookFormat::Epub => "download/epub/",
        }
    }

    /// File extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "pdf",
            BookFormat::Epub => "epub",
        }
    }
}
