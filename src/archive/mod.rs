// src/archive/mod.rs
// =============================================================================
// Building the output zip from the collected file list.
//
// Public API:
// - write_archive: bounded-concurrency download + single-writer zip
// - archive_path: the entry-name check applied to every file
// - ArchiveSummary: what a successful run wrote
// =============================================================================

mod writer;

pub use writer::{archive_path, write_archive, ArchiveSummary};
