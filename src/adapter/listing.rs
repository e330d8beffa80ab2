//! Paginated listing and directory synthesis
//!
//! The store has no directory objects. A listing fetches every resource under
//! the prefix, following `next_cursor` page by page, then derives one
//! directory entry per distinct parent path of the returned files.

use std::collections::BTreeMap;
use tracing::debug;

use super::normalize::normalize_metadata;
use crate::api::{ListRequest, ResourceApi};
use crate::fs::path::parent_of;
use crate::fs::{FsError, Metadata};

/// Fetches all resources under `prefix`, one page at a time.
///
/// Pages are requested sequentially since each cursor is only known from the
/// previous response.
pub async fn fetch_all<A>(api: &A, prefix: &str) -> Result<Vec<Metadata>, FsError>
where
    A: ResourceApi + ?Sized,
{
    let mut files = Vec::new();
    let mut request = ListRequest::new(prefix);
    let mut pages = 0usize;

    loop {
        let page = api
            .resources(request.clone())
            .await
            .map_err(|e| FsError::from_api(e, prefix))?;
        pages += 1;

        files.reserve(page.resources.len());
        for resource in page.resources {
            files.push(normalize_metadata(resource)?);
        }

        match page.next_cursor {
            Some(cursor) => {
                debug!(prefix, pages, fetched = files.len(), "Following listing cursor");
                request = request.with_cursor(cursor);
            }
            None => break,
        }
    }

    debug!(prefix, pages, fetched = files.len(), "Listing complete");
    Ok(files)
}

/// Appends one directory entry per distinct non-root parent of `files`.
pub fn with_directories(mut files: Vec<Metadata>) -> Vec<Metadata> {
    let mut dirs = BTreeMap::new();
    for file in &files {
        if let Some(parent) = parent_of(&file.path) {
            dirs.insert(parent.to_string(), Metadata::dir(parent));
        }
    }

    files.extend(dirs.into_values());
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_deduplicated() {
        let files = vec![
            Metadata::file("a/b/c.txt"),
            Metadata::file("a/b/e.txt"),
            Metadata::file("a/d.txt"),
            Metadata::file("top.txt"),
        ];

        let listing = with_directories(files);
        let dirs: Vec<&str> = listing
            .iter()
            .filter(|m| m.is_dir())
            .map(|m| m.path.as_str())
            .collect();

        assert_eq!(dirs, vec!["a", "a/b"]);
        assert_eq!(listing.iter().filter(|m| m.is_file()).count(), 4);
    }

    #[test]
    fn test_files_come_first() {
        let listing = with_directories(vec![Metadata::file("x/y")]);
        assert_eq!(listing, vec![Metadata::file("x/y"), Metadata::dir("x")]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(with_directories(Vec::new()).is_empty());
    }
}
