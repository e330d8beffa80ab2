//! FilesystemAdapter trait definition

use async_trait::async_trait;

use super::error::FsError;
use super::types::{ByteStream, Metadata, Visibility, WriteOptions};

/// Storage backend behind a [`Filesystem`](super::Filesystem).
///
/// Paths arrive already cleaned by the facade. Implementations translate
/// them to their native addressing and report failures as [`FsError`] kinds.
#[async_trait]
pub trait FilesystemAdapter: Send + Sync {
    async fn write(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<(), FsError>;

    /// Drains `stream` and writes the collected bytes
    async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        options: &WriteOptions,
    ) -> Result<(), FsError>;

    /// Writes `contents`, replacing any existing file
    async fn update(&self, path: &str, contents: Vec<u8>) -> Result<(), FsError> {
        self.write(path, contents, &WriteOptions::overwrite()).await
    }

    async fn move_file(&self, source: &str, destination: &str) -> Result<(), FsError>;

    async fn copy(&self, source: &str, destination: &str) -> Result<(), FsError>;

    async fn delete(&self, path: &str) -> Result<(), FsError>;

    /// Deletes every file under the directory `prefix`
    async fn delete_directory(&self, prefix: &str) -> Result<(), FsError>;

    async fn create_directory(
        &self,
        path: &str,
        options: &WriteOptions,
    ) -> Result<Metadata, FsError>;

    async fn file_exists(&self, path: &str) -> Result<bool, FsError>;

    async fn directory_exists(&self, path: &str) -> Result<bool, FsError>;

    async fn read(&self, path: &str) -> Result<Vec<u8>, FsError>;

    async fn read_stream(&self, path: &str) -> Result<ByteStream, FsError>;

    /// Lists everything under `path`.
    ///
    /// Adapters for flat stores may ignore `recursive` and return the full
    /// subtree; the facade filters non-recursive listings.
    async fn list_contents(&self, path: &str, recursive: bool)
        -> Result<Vec<Metadata>, FsError>;

    async fn metadata(&self, path: &str) -> Result<Metadata, FsError>;

    async fn file_size(&self, path: &str) -> Result<Option<u64>, FsError> {
        Ok(self.metadata(path).await?.size)
    }

    async fn mime_type(&self, path: &str) -> Result<Option<String>, FsError> {
        Ok(self.metadata(path).await?.mime_type)
    }

    /// Seconds since the Unix epoch
    async fn last_modified(&self, path: &str) -> Result<Option<i64>, FsError> {
        Ok(self.metadata(path).await?.timestamp)
    }

    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<(), FsError>;

    async fn visibility(&self, path: &str) -> Result<Visibility, FsError>;
}
