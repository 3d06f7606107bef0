// src/tree/mod.rs
// =============================================================================
// Recursive discovery of every file under the requested folder.
// =============================================================================

mod collect;

pub use collect::collect_files;
