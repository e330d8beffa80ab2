//! Cloudinary filesystem adapter
//!
//! Maps [`FilesystemAdapter`] operations onto a [`ResourceApi`]. Paths are used
//! verbatim as resource keys. Directories are never stored: creating one is a
//! no-op and listings derive them from the keys of the files they contain.
//!
//! # Example
//!
//! ```
//! use cloudinary_fs::api::MockResourceApi;
//! use cloudinary_fs::{CloudinaryAdapter, FilesystemAdapter, WriteOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), cloudinary_fs::FsError> {
//! let adapter = CloudinaryAdapter::new(MockResourceApi::new());
//!
//! adapter
//!     .write("reports/2024/q1.csv", b"a,b\n".to_vec(), &WriteOptions::default())
//!     .await?;
//!
//! let listing = adapter.list_contents("reports/", true).await?;
//! assert_eq!(listing.len(), 2); // the file and the synthesised "reports/2024"
//! # Ok(())
//! # }
//! ```

mod listing;
mod normalize;

pub use normalize::normalize_metadata;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use std::fmt;
use tracing::{debug, info, warn};

use crate::api::{ApiError, CloudinaryClient, DestroyOutcome, ListRequest, ResourceApi};
use crate::config::{CloudinaryConfig, ConfigError};
use crate::fs::path::{directory_prefix, normalize_prefix};
use crate::fs::{ByteStream, FilesystemAdapter, FsError, Metadata, Visibility, WriteOptions};

/// Filesystem adapter over the Cloudinary resource API
///
/// Stateless apart from the client handle; every call goes to the remote
/// service.
pub struct CloudinaryAdapter<A: ResourceApi = CloudinaryClient> {
    api: A,
}

impl CloudinaryAdapter<CloudinaryClient> {
    /// Builds an adapter backed by a real HTTP client
    pub fn from_config(config: &CloudinaryConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.create_client()?))
    }
}

impl<A: ResourceApi> CloudinaryAdapter<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying client
    pub fn api(&self) -> &A {
        &self.api
    }

    async fn collect(path: &str, mut stream: ByteStream) -> Result<Vec<u8>, FsError> {
        let mut contents = Vec::new();
        while let Some(chunk) = stream.try_next().await? {
            contents.extend_from_slice(&chunk);
        }
        debug!("Read {} bytes from {}", contents.len(), path);
        Ok(contents)
    }
}

#[async_trait]
impl<A: ResourceApi> FilesystemAdapter for CloudinaryAdapter<A> {
    async fn write(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<(), FsError> {
        if options.visibility.is_some() {
            return Err(FsError::unsupported("write with visibility"));
        }

        let resource = self
            .api
            .upload(path, contents, options.overwrite)
            .await
            .map_err(|e| FsError::from_api(e, path))?;
        let metadata = normalize_metadata(resource)?;

        info!(
            path = %metadata.path,
            size = ?metadata.size,
            version = metadata.version,
            "Wrote file"
        );
        Ok(())
    }

    async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        options: &WriteOptions,
    ) -> Result<(), FsError> {
        let contents = Self::collect(path, stream).await?;
        self.write(path, contents, options).await
    }

    async fn move_file(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let resource = self
            .api
            .rename(source, destination)
            .await
            .map_err(|e| match e {
                ApiError::NotFound { .. } => FsError::from_api(e, source),
                other => FsError::from_api(other, destination),
            })?;
        normalize_metadata(resource)?;

        info!("Moved {} to {}", source, destination);
        Ok(())
    }

    async fn copy(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let contents = self.read(source).await?;
        self.write(destination, contents, &WriteOptions::default())
            .await?;

        info!("Copied {} to {}", source, destination);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), FsError> {
        let outcome = self
            .api
            .destroy(path)
            .await
            .map_err(|e| FsError::from_api(e, path))?;

        match outcome {
            DestroyOutcome::Ok => {
                info!("Deleted {}", path);
                Ok(())
            }
            DestroyOutcome::NotFound => Err(FsError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    async fn delete_directory(&self, prefix: &str) -> Result<(), FsError> {
        let prefix = normalize_prefix(prefix);
        let deleted = self
            .api
            .delete_by_prefix(&prefix)
            .await
            .map_err(|e| FsError::from_api(e, &prefix))?;

        info!("Deleted {} resources under {}", deleted.len(), prefix);
        Ok(())
    }

    async fn create_directory(
        &self,
        path: &str,
        _options: &WriteOptions,
    ) -> Result<Metadata, FsError> {
        // Folders appear implicitly once a key contains them
        Ok(Metadata::dir(normalize_prefix(path)))
    }

    async fn file_exists(&self, path: &str) -> Result<bool, FsError> {
        match self.metadata(path).await {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => {
                warn!("Treating {} as missing after lookup failure: {}", path, e);
                Ok(false)
            }
        }
    }

    async fn directory_exists(&self, path: &str) -> Result<bool, FsError> {
        let prefix = directory_prefix(path);
        let page = self
            .api
            .resources(ListRequest::new(prefix.as_str()).with_max_results(1))
            .await
            .map_err(|e| FsError::from_api(e, &prefix))?;
        Ok(!page.resources.is_empty())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let stream = self.read_stream(path).await?;
        Self::collect(path, stream).await
    }

    async fn read_stream(&self, path: &str) -> Result<ByteStream, FsError> {
        let stream = self
            .api
            .content(path)
            .await
            .map_err(|e| FsError::from_api(e, path))?;

        let path = path.to_string();
        Ok(stream
            .map_err(move |e| FsError::from_api(e, &path))
            .boxed())
    }

    async fn list_contents(
        &self,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<Metadata>, FsError> {
        debug!(path, recursive, "Listing contents");
        let files = listing::fetch_all(&self.api, path).await?;
        Ok(listing::with_directories(files))
    }

    async fn metadata(&self, path: &str) -> Result<Metadata, FsError> {
        let resource = self
            .api
            .resource(path)
            .await
            .map_err(|e| FsError::from_api(e, path))?;
        normalize_metadata(resource)
    }

    async fn set_visibility(&self, _path: &str, _visibility: Visibility) -> Result<(), FsError> {
        Err(FsError::unsupported("set_visibility"))
    }

    async fn visibility(&self, _path: &str) -> Result<Visibility, FsError> {
        Err(FsError::unsupported("visibility"))
    }
}

impl<A: ResourceApi> fmt::Debug for CloudinaryAdapter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryAdapter")
            .field("api", &self.api.name())
            .finish()
    }
}
