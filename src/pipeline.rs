// src/pipeline.rs
// =============================================================================
// The whole download in one call:
// 1. Build the contents API address for the requested folder
// 2. Walk the folder tree and collect every file
// 3. Download the files and write them into the archive
//
// Any error from any stage is returned unchanged; this is the one place the
// binary looks at to decide whether the run failed.
// =============================================================================

use crate::archive::{write_archive, ArchiveSummary};
use crate::config::Config;
use crate::error::Result;
use crate::github::{Fetcher, Lister, RepositoryLocation};
use crate::tree::collect_files;
use std::path::Path;
use std::sync::Arc;

/// Downloads the folder at `location` into a zip archive at `destination`.
pub async fn download_folder<R>(
    remote: Arc<R>,
    location: &RepositoryLocation,
    destination: &Path,
    config: &Config,
) -> Result<ArchiveSummary>
where
    R: Lister + Fetcher + 'static,
{
    let root_url = location.listing_url(&config.api_base);
    log::info!(
        "Collecting files from {}/{}@{} /{}",
        location.owner(),
        location.repo(),
        location.branch(),
        location.path()
    );

    let files = collect_files(remote.as_ref(), &root_url).await?;
    log::info!("Found {} file(s)", files.len());

    write_archive(remote, files, destination, config.worker_cap).await
}
