// src/archive/writer.rs
// =============================================================================
// The Archive Writer: downloads every collected file and packs them into a
// zip archive.
//
// How it works:
// 1. Fan-out: one tokio task per file. Each task takes a permit from a
//    shared semaphore before fetching, so at most `worker_cap` downloads are
//    in flight; the rest wait for a free permit.
// 2. Fan-in: the calling task pulls finished downloads out of the JoinSet in
//    completion order and is the only code that touches the ZipWriter.
// 3. The zip is built in a temporary file next to the destination and renamed
//    over it only after the central directory has been written.
//
// The first failed download (in completion order) ends the run. Dropping the
// JoinSet aborts the downloads that are still queued or in flight, and
// dropping the temporary file removes the partial archive.
// =============================================================================

use crate::error::{Error, Result};
use crate::github::{Entry, Fetcher};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub destination: PathBuf,
    /// Number of files stored in the archive
    pub entries: usize,
    /// Total uncompressed size of those files
    pub bytes: u64,
}

// One downloaded file on its way to the archive
#[derive(Debug)]
struct FileRecord {
    relative_path: String,
    bytes: Vec<u8>,
}

/// Downloads `files` with at most `worker_cap` concurrent fetches and writes
/// them to a zip archive at `destination`.
///
/// On error nothing is written to `destination`; a file already there is left
/// as it was.
pub async fn write_archive<F>(
    fetcher: Arc<F>,
    files: Vec<Entry>,
    destination: &Path,
    worker_cap: usize,
) -> Result<ArchiveSummary>
where
    F: Fetcher + 'static,
{
    let stage_in = staging_dir(destination);
    let mut staged = tempfile::Builder::new()
        .prefix(".zora-")
        .suffix(".zip.part")
        .tempfile_in(stage_in)
        .map_err(|source| Error::Write {
            path: destination.to_path_buf(),
            source,
        })?;

    log::info!("Downloading {} file(s)...", files.len());
    let mut downloads = spawn_downloads(fetcher, files, worker_cap);

    let (entries, bytes) = {
        let mut archive = ArchiveWriter::new(staged.as_file_mut());

        while let Some(joined) = downloads.join_next().await {
            let record = joined.map_err(|e| Error::Worker(e.to_string()))??;
            archive.add(record)?;
        }

        archive.finish()?
    };

    place(staged, destination)?;
    log::info!(
        "Wrote {} file(s), {} bytes to {}",
        entries,
        bytes,
        destination.display()
    );

    Ok(ArchiveSummary {
        destination: destination.to_path_buf(),
        entries,
        bytes,
    })
}

fn spawn_downloads<F>(
    fetcher: Arc<F>,
    files: Vec<Entry>,
    worker_cap: usize,
) -> JoinSet<Result<FileRecord>>
where
    F: Fetcher + 'static,
{
    let permits = Arc::new(Semaphore::new(worker_cap.max(1)));
    let mut downloads = JoinSet::new();

    for entry in files {
        let fetcher = Arc::clone(&fetcher);
        let permits = Arc::clone(&permits);

        downloads.spawn(async move {
            // Held until the fetch returns, then released by drop
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| Error::Worker(e.to_string()))?;

            let bytes = fetcher.fetch(&entry).await?;
            Ok(FileRecord {
                relative_path: entry.relative_path,
                bytes,
            })
        });
    }

    downloads
}

// The single consumer: owns the zip writer and the set of names written so far
struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    seen: HashSet<String>,
    entries: usize,
    bytes: u64,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    fn new(inner: W) -> Self {
        // Fixed timestamp so the same files in the same order give the same bytes
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Self {
            zip: ZipWriter::new(inner),
            options,
            seen: HashSet::new(),
            entries: 0,
            bytes: 0,
        }
    }

    fn add(&mut self, record: FileRecord) -> Result<()> {
        let name = archive_path(&record.relative_path)?;

        if !self.seen.insert(name.clone()) {
            return Err(Error::DuplicateEntry(name));
        }

        self.zip
            .start_file(name.as_str(), self.options)
            .map_err(|source| Error::Archive {
                entry: name.clone(),
                source,
            })?;
        self.zip
            .write_all(&record.bytes)
            .map_err(|source| Error::Write {
                path: PathBuf::from(&name),
                source,
            })?;

        log::info!("  -> Adding file: {}", name);
        self.entries += 1;
        self.bytes += record.bytes.len() as u64;
        Ok(())
    }

    fn finish(self) -> Result<(usize, u64)> {
        self.zip.finish().map_err(|source| Error::Archive {
            entry: "<central directory>".to_string(),
            source,
        })?;
        Ok((self.entries, self.bytes))
    }
}

/// Validates a repository path for use as a zip entry name.
///
/// Names keep their forward slashes so extraction rebuilds the folder tree.
/// Absolute paths and `.`/`..`/empty components are rejected.
pub fn archive_path(relative_path: &str) -> Result<String> {
    let unsafe_path = || Error::UnsafePath(relative_path.to_string());

    if relative_path.is_empty() || relative_path.starts_with('/') || relative_path.contains('\\')
    {
        return Err(unsafe_path());
    }

    if relative_path
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(unsafe_path());
    }

    Ok(relative_path.to_string())
}

fn staging_dir(destination: &Path) -> &Path {
    destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

// Flush the finished archive to disk and rename it over the destination
fn place(staged: tempfile::NamedTempFile, destination: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: destination.to_path_buf(),
        source,
    };

    staged.as_file().sync_all().map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(staged.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }

    let _file: File = staged
        .persist(destination)
        .map_err(|e| write_error(e.error))?;
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a JoinSet and not a Vec of JoinHandles?
//    - join_next() hands back whichever task finished first
//    - Entries therefore land in the archive in completion order, not in the
//      order the tree walk found them. Readers don't care about entry order.
//
// 2. What does the Semaphore hold?
//    - worker_cap permits. acquire_owned() waits until one is free and returns
//      an OwnedSemaphorePermit that gives the permit back when dropped.
//
// 3. Why is there a `??` after join_next()?
//    - The outer Result is the task itself (panicked or aborted)
//    - The inner Result is the download (HTTP status, transport error)
// -----------------------------------------------------------------------------
