//! Path-cleaning facade over a [`FilesystemAdapter`]
//!
//! Adapters receive keys in one canonical shape (no leading or doubled
//! separators, no relative segments). The facade also turns the full-subtree
//! listings that flat stores produce into proper directory listings.

use std::collections::BTreeSet;

use super::adapter::FilesystemAdapter;
use super::error::FsError;
use super::path::{clean, clean_file, directory_prefix, parent_of, SEPARATOR};
use super::types::{ByteStream, Metadata, Visibility, WriteOptions};

/// High-level filesystem handle
#[derive(Debug)]
pub struct Filesystem<A: FilesystemAdapter> {
    adapter: A,
}

impl<A: FilesystemAdapter> Filesystem<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    pub async fn write(
        &self,
        path: &str,
        contents: impl Into<Vec<u8>>,
        options: &WriteOptions,
    ) -> Result<(), FsError> {
        let path = clean_file(path)?;
        self.adapter.write(&path, contents.into(), options).await
    }

    pub async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        options: &WriteOptions,
    ) -> Result<(), FsError> {
        let path = clean_file(path)?;
        self.adapter.write_stream(&path, stream, options).await
    }

    pub async fn update(&self, path: &str, contents: impl Into<Vec<u8>>) -> Result<(), FsError> {
        let path = clean_file(path)?;
        self.adapter.update(&path, contents.into()).await
    }

    pub async fn move_file(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let source = clean_file(source)?;
        let destination = clean_file(destination)?;
        self.adapter.move_file(&source, &destination).await
    }

    pub async fn copy(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let source = clean_file(source)?;
        let destination = clean_file(destination)?;
        self.adapter.copy(&source, &destination).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), FsError> {
        self.adapter.delete(&clean_file(path)?).await
    }

    /// Deletes a directory and everything below it; the root cannot be deleted.
    pub async fn delete_directory(&self, path: &str) -> Result<(), FsError> {
        let dir = clean(path)?;
        if dir.is_empty() {
            return Err(FsError::InvalidPath {
                path: path.to_string(),
                reason: "refusing to delete the root directory".to_string(),
            });
        }
        self.adapter.delete_directory(&dir).await
    }

    /// Creating the root is allowed and yields a `/` entry.
    pub async fn create_directory(
        &self,
        path: &str,
        options: &WriteOptions,
    ) -> Result<Metadata, FsError> {
        self.adapter.create_directory(&clean(path)?, options).await
    }

    pub async fn file_exists(&self, path: &str) -> Result<bool, FsError> {
        self.adapter.file_exists(&clean_file(path)?).await
    }

    pub async fn directory_exists(&self, path: &str) -> Result<bool, FsError> {
        self.adapter.directory_exists(&clean(path)?).await
    }

    pub async fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.adapter.read(&clean_file(path)?).await
    }

    pub async fn read_stream(&self, path: &str) -> Result<ByteStream, FsError> {
        self.adapter.read_stream(&clean_file(path)?).await
    }

    /// Lists a directory, sorted by path.
    ///
    /// Non-recursive listings contain the direct children of `path` only;
    /// recursive listings contain every file below it plus every directory
    /// between `path` and those files.
    pub async fn list_contents(
        &self,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<Metadata>, FsError> {
        let prefix = directory_prefix(&clean(path)?);

        let entries = self.adapter.list_contents(&prefix, recursive).await?;
        Ok(scope_listing(entries, &prefix, recursive))
    }

    pub async fn metadata(&self, path: &str) -> Result<Metadata, FsError> {
        self.adapter.metadata(&clean_file(path)?).await
    }

    pub async fn file_size(&self, path: &str) -> Result<Option<u64>, FsError> {
        self.adapter.file_size(&clean_file(path)?).await
    }

    pub async fn mime_type(&self, path: &str) -> Result<Option<String>, FsError> {
        self.adapter.mime_type(&clean_file(path)?).await
    }

    pub async fn last_modified(&self, path: &str) -> Result<Option<i64>, FsError> {
        self.adapter.last_modified(&clean_file(path)?).await
    }

    pub async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<(), FsError> {
        self.adapter
            .set_visibility(&clean_file(path)?, visibility)
            .await
    }

    pub async fn visibility(&self, path: &str) -> Result<Visibility, FsError> {
        self.adapter.visibility(&clean_file(path)?).await
    }
}

/// Restricts an adapter listing to the entries below `prefix`.
///
/// `prefix` is either empty (root) or ends with a separator.
fn scope_listing(entries: Vec<Metadata>, prefix: &str, recursive: bool) -> Vec<Metadata> {
    let mut files = Vec::new();
    let mut dirs = BTreeSet::new();

    for entry in entries {
        let relative = match entry.path.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => rest,
            _ => continue,
        };

        // Every directory between the prefix and the entry
        let mut ancestors: Vec<&str> = Vec::new();
        let mut current = relative;
        while let Some(parent) = parent_of(current) {
            ancestors.push(parent);
            current = parent;
        }

        if recursive {
            for ancestor in ancestors {
                dirs.insert(format!("{}{}", prefix, ancestor));
            }
            if entry.is_dir() {
                dirs.insert(entry.path);
            } else {
                files.push(entry);
            }
            continue;
        }

        match relative.split_once(SEPARATOR) {
            Some((child, _)) => {
                dirs.insert(format!("{}{}", prefix, child));
            }
            None if entry.is_dir() => {
                dirs.insert(entry.path);
            }
            None => files.push(entry),
        }
    }

    let mut listing: Vec<Metadata> = files
        .into_iter()
        .chain(dirs.into_iter().map(Metadata::dir))
        .collect();
    listing.sort_by(|a, b| a.path.cmp(&b.path));
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(listing: &[Metadata]) -> Vec<(String, bool)> {
        listing
            .iter()
            .map(|m| (m.path.clone(), m.is_dir()))
            .collect()
    }

    fn sample() -> Vec<Metadata> {
        vec![
            Metadata::file("a/b/c.txt"),
            Metadata::file("a/d.txt"),
            Metadata::file("a/x/y/z.txt"),
            Metadata::file("top.txt"),
            Metadata::dir("a"),
            Metadata::dir("a/b"),
            Metadata::dir("a/x/y"),
        ]
    }

    #[test]
    fn test_root_non_recursive() {
        let listing = scope_listing(sample(), "", false);
        assert_eq!(
            paths(&listing),
            vec![("a".to_string(), true), ("top.txt".to_string(), false)]
        );
    }

    #[test]
    fn test_subdirectory_non_recursive() {
        let listing = scope_listing(sample(), "a/", false);
        assert_eq!(
            paths(&listing),
            vec![
                ("a/b".to_string(), true),
                ("a/d.txt".to_string(), false),
                ("a/x".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_subdirectory_recursive_fills_ancestors() {
        let listing = scope_listing(sample(), "a/", true);
        assert_eq!(
            paths(&listing),
            vec![
                ("a/b".to_string(), true),
                ("a/b/c.txt".to_string(), false),
                ("a/d.txt".to_string(), false),
                ("a/x".to_string(), true),
                ("a/x/y".to_string(), true),
                ("a/x/y/z.txt".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_directory_itself_excluded() {
        let listing = scope_listing(vec![Metadata::dir("a/")], "a/", true);
        assert!(listing.is_empty());
    }
}
