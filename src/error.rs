// src/error.rs
// =============================================================================
// Error types for the download pipeline.
//
// Every stage reports failures through one enum so the top-level call can
// decide how to present them:
// - Listing: a contents API call failed or returned something we can't decode
// - Fetch: a file's raw bytes could not be downloaded
// - Write / Archive / DuplicateEntry / UnsafePath: building the zip failed
// =============================================================================

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid GitHub folder URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid repository location: {0}")]
    InvalidLocation(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to list {url}: {detail}")]
    Listing { url: String, detail: String },

    #[error("failed to download {path}: {detail}")]
    Fetch { path: String, detail: String },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to add '{entry}' to archive: {source}")]
    Archive {
        entry: String,
        source: zip::result::ZipError,
    },

    #[error("duplicate archive entry '{0}'")]
    DuplicateEntry(String),

    #[error("refusing to archive unsafe path '{0}'")]
    UnsafePath(String),

    #[error("download worker failed: {0}")]
    Worker(String),
}

impl Error {
    /// True for the local-I/O side of the pipeline (creating or filling the archive).
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            Error::Write { .. }
                | Error::Archive { .. }
                | Error::DuplicateEntry(_)
                | Error::UnsafePath(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
