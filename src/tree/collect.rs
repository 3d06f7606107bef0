// src/tree/collect.rs
// =============================================================================
// The Tree Collector: walks a folder through the Lister and flattens it into
// the list of files it contains.
//
// How it works:
// 1. List the root folder
// 2. Walk its entries in the order the API returned them
// 3. A file is appended to the result
// 4. A directory is listed and walked in full before moving to the next entry
//
// The output order is therefore a depth-first, listing-order traversal and is
// identical across runs for the same tree.
//
// The first listing failure anywhere stops the walk; no sibling folder is
// listed after it.
// =============================================================================

use crate::error::Result;
use crate::github::{Entry, Lister};
use futures::future::{BoxFuture, FutureExt}; // .boxed() for the recursive walk

/// Returns every file under `root_listing_url`, directories excluded.
pub async fn collect_files<L>(lister: &L, root_listing_url: &str) -> Result<Vec<Entry>>
where
    L: Lister + ?Sized,
{
    let mut files = Vec::new();
    collect_into(lister, root_listing_url, &mut files).await?;
    Ok(files)
}

// An async fn can't call itself directly (its future would have infinite
// size), so the recursion goes through a boxed future.
fn collect_into<'a, L>(
    lister: &'a L,
    listing_url: &'a str,
    files: &'a mut Vec<Entry>,
) -> BoxFuture<'a, Result<()>>
where
    L: Lister + ?Sized,
{
    async move {
        let entries = lister.list(listing_url).await?;

        for entry in entries {
            if entry.is_file() {
                log::debug!("Found file: {}", entry.relative_path);
                files.push(entry);
            } else {
                log::info!("  -> Entering directory: {}", entry.relative_path);
                collect_into(lister, &entry.listing_url, files).await?;
            }
        }

        Ok(())
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is BoxFuture<'a, T>?
//    - Pin<Box<dyn Future<Output = T> + Send + 'a>>
//    - A heap-allocated future of known size, so a function may await itself
//
// 2. Why are all three arguments tied to the same lifetime 'a?
//    - The returned future borrows the lister, the URL and the result list
//    - It must not outlive any of them
//
// 3. Why does `?` inside the loop stop everything?
//    - It returns from the innermost call, whose caller is also using `?`,
//      so the error travels all the way up before any sibling is listed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::github::EntryKind;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // In-memory contents API: listing URL -> entries, or None for a 500
    struct MockTree {
        folders: HashMap<String, Option<Vec<Entry>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTree {
        fn new() -> Self {
            Self {
                folders: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn folder(mut self, url: &str, entries: Vec<Entry>) -> Self {
            self.folders.insert(url.to_string(), Some(entries));
            self
        }

        fn broken(mut self, url: &str) -> Self {
            self.folders.insert(url.to_string(), None);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Lister for MockTree {
        async fn list(&self, listing_url: &str) -> Result<Vec<Entry>> {
            self.calls.lock().unwrap().push(listing_url.to_string());
            match self.folders.get(listing_url) {
                Some(Some(entries)) => Ok(entries.clone()),
                _ => Err(Error::Listing {
                    url: listing_url.to_string(),
                    detail: "github API responded with status: 500 Internal Server Error"
                        .to_string(),
                }),
            }
        }
    }

    fn file(path: &str) -> Entry {
        Entry::file(path, format!("raw://{}", path))
    }

    fn dir(path: &str) -> Entry {
        Entry::directory(path, format!("list://{}", path))
    }

    fn paths(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative_path.as_str()).collect()
    }

    // root/
    //   a.txt
    //   sub/
    //     b.txt
    //     deep/
    //       c.txt
    //   z.txt
    //   other/
    //     d.txt
    fn nested_tree() -> MockTree {
        MockTree::new()
            .folder(
                "list://root",
                vec![file("a.txt"), dir("sub"), file("z.txt"), dir("other")],
            )
            .folder("list://sub", vec![file("sub/b.txt"), dir("sub/deep")])
            .folder("list://sub/deep", vec![file("sub/deep/c.txt")])
            .folder("list://other", vec![file("other/d.txt")])
    }

    #[tokio::test]
    async fn test_collect_depth_first_listing_order() {
        let tree = nested_tree();
        let files = collect_files(&tree, "list://root").await.unwrap();

        assert_eq!(
            paths(&files),
            vec!["a.txt", "sub/b.txt", "sub/deep/c.txt", "z.txt", "other/d.txt"]
        );
        assert!(files.iter().all(|f| f.kind == EntryKind::File));
    }

    #[tokio::test]
    async fn test_collect_is_deterministic() {
        let tree = nested_tree();
        let first = collect_files(&tree, "list://root").await.unwrap();
        for _ in 0..5 {
            let again = collect_files(&tree, "list://root").await.unwrap();
            assert_eq!(first, again);
        }
    }

    #[tokio::test]
    async fn test_collect_every_file_once_at_any_depth() {
        // A chain ten folders deep with two files per level
        let mut tree = MockTree::new();
        let mut expected = Vec::new();
        let mut folder_path = "root".to_string();

        for level in 0..10 {
            let one = format!("{}/one.txt", folder_path);
            let two = format!("{}/two.txt", folder_path);
            expected.push(one.clone());
            expected.push(two.clone());

            let mut entries = vec![file(&one), file(&two)];
            let child_path = format!("{}/level{}", folder_path, level + 1);
            if level < 9 {
                entries.push(dir(&child_path));
            }

            tree = tree.folder(&format!("list://{}", folder_path), entries);
            folder_path = child_path;
        }

        let files = collect_files(&tree, "list://root").await.unwrap();
        assert_eq!(files.len(), 20);
        assert_eq!(paths(&files), expected);
    }

    #[tokio::test]
    async fn test_collect_stops_at_first_failing_subdirectory() {
        let tree = MockTree::new()
            .folder(
                "list://root",
                vec![dir("first"), dir("bad"), dir("later"), file("x.txt")],
            )
            .folder("list://first", vec![file("first/a.txt")])
            .broken("list://bad")
            .folder("list://later", vec![file("later/b.txt")]);

        let err = collect_files(&tree, "list://root").await.unwrap_err();
        match err {
            Error::Listing { url, detail } => {
                assert_eq!(url, "list://bad");
                assert!(detail.contains("500"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert_eq!(tree.calls(), vec!["list://root", "list://first", "list://bad"]);
    }

    #[tokio::test]
    async fn test_collect_root_failure() {
        let tree = MockTree::new().broken("list://root");
        assert!(collect_files(&tree, "list://root").await.is_err());
        assert_eq!(tree.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_collect_empty_folder() {
        let tree = MockTree::new()
            .folder("list://root", vec![dir("empty")])
            .folder("list://empty", vec![]);
        let files = collect_files(&tree, "list://root").await.unwrap();
        assert!(files.is_empty());
    }
}
