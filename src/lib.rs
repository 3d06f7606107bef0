// src/lib.rs
// =============================================================================
// zora: download one folder of a public GitHub repository as a zip archive,
// without cloning the repository.
//
// Modules:
// - github: folder location, listing and file download over the REST API
// - tree: recursive walk that flattens a folder into its files
// - archive: bounded-concurrency download and single-writer zip output
// - pipeline: the three stages wired together
// =============================================================================

pub mod archive; // src/archive/ - zip writing
pub mod config;
pub mod error;
pub mod github; // src/github/ - everything that talks HTTP
pub mod pipeline;
pub mod tree; // src/tree/ - recursive folder walk

pub use archive::ArchiveSummary;
pub use config::Config;
pub use error::{Error, Result};
pub use github::{Entry, EntryKind, Fetcher, GitHubClient, Lister, RepositoryLocation};
pub use pipeline::download_folder;
