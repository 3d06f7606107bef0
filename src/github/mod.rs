// src/github/mod.rs
// =============================================================================
// Everything that knows about GitHub:
// - location: which folder of which repository to download
// - listing: the Entry type and the Lister seam (one folder per call)
// - fetch: the reqwest-backed client and the Fetcher seam (one file per call)
// =============================================================================

mod fetch;
mod listing;
mod location;

pub use fetch::{Fetcher, GitHubClient};
pub use listing::{decode_listing, Entry, EntryKind, Lister};
pub use location::RepositoryLocation;
