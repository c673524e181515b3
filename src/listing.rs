use log::warn;
use reqwest::blocking::Client;

use crate::book::Book;
use crate::error::DownloadError;
use crate::format::BookFormat;

/// Fixed query parameters for the book listing search.
const PAGE_PARAMS: &str = "?showAll=true&package=mat-covid19_textbooks\
&facet-content-type=%22Book%22&sortOrder=newestFirst";

/// Builds the URL of one listing page.
pub fn listing_url(base_url: &str, page_number: u32) -> String {
    format!("{}/search/page/{}{}", base_url, page_number, PAGE_PARAMS)
}

/// Fetches one listing page and parses it into a document.
///
/// Returns `None` on a non-200 status; the page is reported and the caller
/// is expected to skip it and move on.
pub fn fetch_listing_page(
    client: &Client,
    base_url: &str,
    page_number: u32,
) -> Result<Option<scraper::Html>, DownloadError> {
    println!("Fetching page {}", page_number);

    let response = client.get(listing_url(base_url, page_number)).send()?;
    let status = response.status();

    if status != reqwest::StatusCode::OK {
        warn!("Request on page {} failed with status {}", page_number, status);
        return Ok(None);
    }

    let body = response.text()?;
    Ok(Some(scraper::Html::parse_document(body.trim())))
}

/// Collects one [`Book`] per listing-title anchor, in document order.
pub fn extract_books(
    document: &scraper::Html,
    format: BookFormat,
) -> Result<Vec<Book>, DownloadError> {
    let title_selector = scraper::Selector::parse("a.title")
        .map_err(|_| DownloadError::SelectorError(String::from("Failed to parse a.title selector")))?;

    let mut books = Vec::new();
    for element in document.select(&title_selector) {
        let href = element.attr("href").ok_or_else(|| {
            DownloadError::AttributeNotFound(String::from("Listing anchor has no href attribute"))
        })?;
        let title = element.text().collect::<Vec<_>>().join(" ");
        books.push(Book::new(&title, href, format));
    }

    Ok(books)
}
