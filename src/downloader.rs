use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::debug;
use reqwest::blocking::Client;

use crate::book::Book;
use crate::error::DownloadError;

/// Bytes copied from the response to the file per read.
const CHUNK_SIZE: usize = 8192;

#[derive(Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded,
    Skipped,
}

/// Writes books into one flat output directory.
///
/// The directory is created at construction. Downloads stream into a
/// `*.part` file and are renamed into place on completion, so the final
/// filename only ever holds a complete download.
pub struct BookDownloader {
    folder: PathBuf,
    overwrite: bool,
    interrupted: Arc<AtomicBool>,
}

impl BookDownloader {
    pub fn new(
        folder: impl AsRef<Path>,
        overwrite: bool,
        interrupted: Arc<AtomicBool>,
    ) -> Result<Self, DownloadError> {
        let folder = folder.as_ref().to_path_buf();
        ensure_dir_exists(&folder)?;
        Ok(Self {
            folder,
            overwrite,
            interrupted,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn target_path(&self, book: &Book) -> PathBuf {
        self.folder.join(book.file_name())
    }

    fn part_path(&self, book: &Book) -> PathBuf {
        self.folder.join(format!("{}.part", book.file_name()))
    }

    /// Downloads one book, or skips it when the file is already present and
    /// overwriting is disabled. The interrupt flag is polled between chunks;
    /// when it is set mid-stream the partial file is left at its `.part`
    /// path and [`DownloadError::Interrupted`] is returned.
    pub fn get(
        &self,
        client: &Client,
        base_url: &str,
        book: &Book,
    ) -> Result<DownloadOutcome, DownloadError> {
        let file_path = self.target_path(book);
        if file_path.is_file() && !self.overwrite {
            println!("Already found {} in folder, skipping...", book.title());
            return Ok(DownloadOutcome::Skipped);
        }

        println!("Attempting to download <<{}>> ...", book.title());
        let url = book.download_url(base_url);
        debug!("GET {}", url);

        let mut response = client.get(url.as_str()).send()?.error_for_status()?;

        let progress_style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} ({eta})"
        )
        .unwrap()
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
        })
        .progress_chars("#>-");

        let progress_bar = ProgressBar::new(response.content_length().unwrap_or(0));
        progress_bar.set_style(progress_style);

        let part_path = self.part_path(book);
        let mut file = File::create(&part_path)?;
        println!("Saving to <<{}>>", file_path.display());

        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("Interrupted");
                return Err(DownloadError::Interrupted);
            }

            let bytes_read = response.read(&mut chunk)?;
            if bytes_read == 0 {
                break;
            }
            file.write_all(&chunk[..bytes_read])?;
            progress_bar.inc(bytes_read as u64);
        }

        drop(file);
        fs::rename(&part_path, &file_path)?;

        progress_bar.finish_and_clear();
        println!("<<{}>> downloaded!", book.title());
        Ok(DownloadOutcome::Downloaded)
    }

    /// Removes the partial file of an interrupted download. Errors if no
    /// partial file exists, so only call it after a write has started.
    pub fn flush_unfinished(&self, book: &Book) -> Result<(), DownloadError> {
        let part_path = self.part_path(book);
        fs::remove_file(&part_path)?;
        println!("<<{}>> deleted.", part_path.display());
        Ok(())
    }
}

/// Ensures a directory exists, creating it if necessary.
pub fn ensure_dir_exists(path: &Path) -> Result<(), DownloadError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
