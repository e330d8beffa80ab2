use super::error::ApiError;
use super::types::{ApiByteStream, DestroyOutcome, ListRequest, RawResource, ResourcePage};
use async_trait::async_trait;

/// Client for a remote, flat, prefix-keyed resource store.
///
/// Implementations own transport, authentication and retries. Every method
/// performs exactly one logical remote operation.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Stores `contents` under `path`, replacing an existing resource only when `overwrite` is set.
    async fn upload(
        &self,
        path: &str,
        contents: Vec<u8>,
        overwrite: bool,
    ) -> Result<RawResource, ApiError>;

    /// Renames a resource; fails with `Conflict` when `to` already exists.
    async fn rename(&self, from: &str, to: &str) -> Result<RawResource, ApiError>;

    async fn destroy(&self, path: &str) -> Result<DestroyOutcome, ApiError>;

    /// Deletes every resource whose key starts with `prefix` and returns the deleted keys.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<Vec<String>, ApiError>;

    async fn content(&self, path: &str) -> Result<ApiByteStream, ApiError>;

    /// Fetches one page of resources.
    async fn resources(&self, request: ListRequest) -> Result<ResourcePage, ApiError>;

    async fn resource(&self, path: &str) -> Result<RawResource, ApiError>;

    fn name(&self) -> &str;
}
