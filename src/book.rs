use crate::format::BookFormat;

/// The fixed substring in a detail-page href that gets replaced with the
/// format-specific path segment.
const MARKER_SEGMENT: &str = "book/";

/// Characters stripped from titles so the derived filename is safe on all
/// supported filesystems.
const BAD_FILENAME_CHARS: &str = r"\/:*?<>|";

/// One book discovered on a listing page.
///
/// The title is sanitized at construction; href and format are kept as-is.
/// The filename and download URL are derived on demand, never stored.
#[derive(Debug, Clone)]
pub struct Book {
    title: String,
    href: String,
    format: BookFormat,
}

impl Book {
    pub fn new(title: &str, href: &str, format: BookFormat) -> Self {
        let mut title = sanitize_title(title);
        if title.is_empty() {
            // A title made entirely of stripped characters would otherwise
            // produce a filename like ".pdf"; fall back to the id segment
            // at the end of the href.
            title = href
                .rsplit('/')
                .find(|s| !s.is_empty())
                .unwrap_or("untitled")
                .to_string();
        }
        Self {
            title,
            href: href.to_string(),
            format,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Filename the book is saved under: `{title}.{extension}`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.title, self.format.extension())
    }

    /// Fully-qualified download URL for the chosen format.
    ///
    /// Replaces the first `book/` marker in the href with the format's path
    /// segment and appends the extension. An href without the marker passes
    /// through unchanged and will surface as an HTTP failure later.
    pub fn download_url(&self, base_url: &str) -> String {
        let changed = self.href.replacen(MARKER_SEGMENT, self.format.url_modifier(), 1);
        let separator = if changed.starts_with('/') { "" } else { "/" };
        format!(
            "{}{}{}.{}",
            base_url,
            separator,
            changed,
            self.format.extension()
        )
    }
}

/// Removes filesystem-unsafe characters and surrounding whitespace.
pub fn sanitize_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .filter(|c| !BAD_FILENAME_CHARS.contains(*c))
        .collect()
}
