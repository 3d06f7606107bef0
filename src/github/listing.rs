// src/github/listing.rs
// =============================================================================
// The Directory Lister: one contents API call returns the immediate children
// of one folder.
//
// The API answers with a JSON array like:
//   [{"name": "a.txt", "path": "docs/a.txt", "type": "file",
//     "download_url": "https://raw.githubusercontent.com/...", "url": "..."},
//    {"name": "sub", "path": "docs/sub", "type": "dir",
//     "download_url": null, "url": "https://api.github.com/...?ref=main"}]
//
// "file" and "dir" become Entry values. Anything else (symlink, submodule,
// types GitHub may add later) is skipped.
// =============================================================================

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One item returned by a single listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Repository-relative path with forward slashes, e.g. `docs/sub/b.txt`
    pub relative_path: String,
    pub kind: EntryKind,
    /// Raw bytes address; only set for files
    pub content_url: Option<String>,
    /// Sub-listing address; only meaningful for directories
    pub listing_url: String,
}

impl Entry {
    pub fn file(relative_path: impl Into<String>, content_url: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        Self {
            name: file_name(&relative_path),
            relative_path,
            kind: EntryKind::File,
            content_url: Some(content_url.into()),
            listing_url: String::new(),
        }
    }

    pub fn directory(relative_path: impl Into<String>, listing_url: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        Self {
            name: file_name(&relative_path),
            relative_path,
            kind: EntryKind::Directory,
            content_url: None,
            listing_url: listing_url.into(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

fn file_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Anything that can answer a listing call.
///
/// `GitHubClient` talks to the real API; tests plug in an in-memory tree.
#[async_trait]
pub trait Lister: Send + Sync {
    async fn list(&self, listing_url: &str) -> Result<Vec<Entry>>;
}

// Shape of one element of the contents API response
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    download_url: Option<String>,
    url: String,
}

/// Decodes a contents API response body into entries, keeping listing order.
pub fn decode_listing(listing_url: &str, body: &[u8]) -> Result<Vec<Entry>> {
    let items: Vec<ContentItem> = serde_json::from_slice(body).map_err(|e| Error::Listing {
        url: listing_url.to_string(),
        detail: format!("failed to decode API response: {}", e),
    })?;

    let entries = items
        .into_iter()
        .filter_map(|item| {
            let kind = match item.item_type.as_str() {
                "file" => EntryKind::File,
                "dir" => EntryKind::Directory,
                other => {
                    log::warn!("Skipping {} ({} entries are not downloaded)", item.path, other);
                    return None;
                }
            };
            Some(Entry {
                name: item.name,
                relative_path: item.path,
                kind,
                content_url: item.download_url,
                listing_url: item.url,
            })
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {"name": "a.txt", "path": "docs/a.txt", "type": "file", "sha": "abc", "size": 5,
         "download_url": "https://raw.example/docs/a.txt",
         "url": "https://api.example/repos/o/r/contents/docs/a.txt?ref=main"},
        {"name": "sub", "path": "docs/sub", "type": "dir",
         "download_url": null,
         "url": "https://api.example/repos/o/r/contents/docs/sub?ref=main"},
        {"name": "vendor", "path": "docs/vendor", "type": "submodule",
         "download_url": null,
         "url": "https://api.example/repos/o/r/contents/docs/vendor?ref=main"}
    ]"#;

    #[test]
    fn test_decode_files_and_dirs_in_order() {
        let entries = decode_listing("u", LISTING.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].relative_path, "docs/a.txt");
        assert_eq!(
            entries[0].content_url.as_deref(),
            Some("https://raw.example/docs/a.txt")
        );

        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(
            entries[1].listing_url,
            "https://api.example/repos/o/r/contents/docs/sub?ref=main"
        );
    }

    #[test]
    fn test_decode_empty_listing() {
        assert!(decode_listing("u", b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        // The API returns a single object when the path is a file
        let body = br#"{"name": "a.txt", "path": "a.txt", "type": "file",
                        "download_url": null, "url": "x"}"#;
        let err = decode_listing("https://api.example/x", body).unwrap_err();
        match err {
            Error::Listing { url, .. } => assert_eq!(url, "https://api.example/x"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("sub/b.txt", "https://raw.example/sub/b.txt");
        assert_eq!(file.name, "b.txt");
        assert!(file.is_file());

        let dir = Entry::directory("sub", "https://api.example/sub");
        assert!(!dir.is_file());
        assert!(dir.content_url.is_none());
    }
}
