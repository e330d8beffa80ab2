use super::client::ResourceApi;
use super::error::ApiError;
use super::types::{ApiByteStream, DestroyOutcome, ListRequest, RawResource, ResourcePage};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use futures_util::stream;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

/// A remote call observed by [`MockResourceApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Upload { path: String, overwrite: bool },
    Rename { from: String, to: String },
    Destroy { path: String },
    DeleteByPrefix { prefix: String },
    Content { path: String },
    Resources(ListRequest),
    Resource { path: String },
}

#[derive(Debug, Clone)]
struct StoredResource {
    contents: Vec<u8>,
    created_at: String,
    version: u64,
}

/// In-memory resource store that records every call.
///
/// Listing pages through the stored keys in sorted order using the numeric
/// offset as cursor, unless pages were scripted with [`push_page`](Self::push_page).
/// Errors queued with [`fail_next`](Self::fail_next) are returned by the next
/// calls, in order, before any store access.
pub struct MockResourceApi {
    store: Mutex<BTreeMap<String, StoredResource>>,
    pages: Mutex<VecDeque<ResourcePage>>,
    failures: Mutex<VecDeque<ApiError>>,
    calls: Mutex<Vec<ApiCall>>,
    page_size: Option<usize>,
    next_version: Mutex<u64>,
    name: String,
}

impl MockResourceApi {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(BTreeMap::new()),
            pages: Mutex::new(VecDeque::new()),
            failures: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            page_size: None,
            next_version: Mutex::new(1),
            name: "MockResourceApi".to_string(),
        }
    }

    /// Caps listing pages below the requested `max_results`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Stores a resource without recording a call
    pub fn insert(&self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        let stored = self.stored(contents.into());
        self.store.lock().unwrap().insert(path.into(), stored);
    }

    /// Queues a page returned verbatim by the next `resources` call
    pub fn push_page(&self, page: ResourcePage) {
        self.pages.lock().unwrap().push_back(page);
    }

    /// Queues an error returned by the next call of any kind
    pub fn fail_next(&self, error: ApiError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.lock().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stored(&self, contents: Vec<u8>) -> StoredResource {
        let mut next_version = self.next_version.lock().unwrap();
        let version = *next_version;
        *next_version += 1;

        StoredResource {
            contents,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version,
        }
    }

    fn begin(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(path: &str) -> ApiError {
        ApiError::NotFound {
            message: format!("Resource not found - {}", path),
        }
    }

    fn describe(path: &str, stored: &StoredResource) -> RawResource {
        let resource = RawResource::new(path)
            .with_bytes(stored.contents.len() as u64)
            .with_created_at(stored.created_at.clone())
            .with_version(stored.version);

        match path.rsplit_once('.') {
            Some((_, ext)) if !ext.contains('/') => resource.with_format("raw", ext),
            _ => resource,
        }
    }
}

impl Default for MockResourceApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceApi for MockResourceApi {
    async fn upload(
        &self,
        path: &str,
        contents: Vec<u8>,
        overwrite: bool,
    ) -> Result<RawResource, ApiError> {
        self.begin(ApiCall::Upload {
            path: path.to_string(),
            overwrite,
        })?;

        if !overwrite && self.contains(path) {
            return Err(ApiError::Conflict {
                message: format!("Resource {} already exists", path),
            });
        }

        let stored = self.stored(contents);
        let resource = Self::describe(path, &stored);
        self.store.lock().unwrap().insert(path.to_string(), stored);
        Ok(resource)
    }

    async fn rename(&self, from: &str, to: &str) -> Result<RawResource, ApiError> {
        self.begin(ApiCall::Rename {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        let mut store = self.store.lock().unwrap();
        if store.contains_key(to) {
            return Err(ApiError::Conflict {
                message: format!("to_public_id {} already exists", to),
            });
        }
        let stored = store.remove(from).ok_or_else(|| Self::not_found(from))?;
        let resource = Self::describe(to, &stored);
        store.insert(to.to_string(), stored);
        Ok(resource)
    }

    async fn destroy(&self, path: &str) -> Result<DestroyOutcome, ApiError> {
        self.begin(ApiCall::Destroy {
            path: path.to_string(),
        })?;

        match self.store.lock().unwrap().remove(path) {
            Some(_) => Ok(DestroyOutcome::Ok),
            None => Ok(DestroyOutcome::NotFound),
        }
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<Vec<String>, ApiError> {
        self.begin(ApiCall::DeleteByPrefix {
            prefix: prefix.to_string(),
        })?;

        let mut store = self.store.lock().unwrap();
        let doomed: Vec<String> = store
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        for key in &doomed {
            store.remove(key);
        }
        Ok(doomed)
    }

    async fn content(&self, path: &str) -> Result<ApiByteStream, ApiError> {
        self.begin(ApiCall::Content {
            path: path.to_string(),
        })?;

        let contents = self
            .store
            .lock()
            .unwrap()
            .get(path)
            .map(|stored| stored.contents.clone())
            .ok_or_else(|| Self::not_found(path))?;

        // Two chunks so consumers exercise reassembly
        let split = contents.len() / 2;
        let tail = contents[split..].to_vec();
        let mut head = contents;
        head.truncate(split);
        let chunks: Vec<Result<Bytes, ApiError>> =
            vec![Ok(Bytes::from(head)), Ok(Bytes::from(tail))];
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn resources(&self, request: ListRequest) -> Result<ResourcePage, ApiError> {
        self.begin(ApiCall::Resources(request.clone()))?;

        if let Some(page) = self.pages.lock().unwrap().pop_front() {
            return Ok(page);
        }

        let offset = match &request.next_cursor {
            Some(cursor) => cursor.parse::<usize>().map_err(|_| ApiError::Api {
                status_code: 400,
                message: format!("Invalid next_cursor {}", cursor),
            })?,
            None => 0,
        };
        let limit = match self.page_size {
            Some(size) => size.min(request.max_results as usize),
            None => request.max_results as usize,
        }
        .max(1);

        let store = self.store.lock().unwrap();
        let matching: Vec<RawResource> = store
            .iter()
            .filter(|(key, _)| key.starts_with(&request.prefix))
            .map(|(key, stored)| Self::describe(key, stored))
            .collect();

        let end = (offset + limit).min(matching.len());
        let resources = matching.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let next_cursor = (end < matching.len()).then(|| end.to_string());

        Ok(ResourcePage {
            resources,
            next_cursor,
        })
    }

    async fn resource(&self, path: &str) -> Result<RawResource, ApiError> {
        self.begin(ApiCall::Resource {
            path: path.to_string(),
        })?;

        self.store
            .lock()
            .unwrap()
            .get(path)
            .map(|stored| Self::describe(path, stored))
            .ok_or_else(|| Self::not_found(path))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockResourceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockResourceApi")
            .field("name", &self.name)
            .field("resources", &self.len())
            .field("calls", &self.calls.lock().unwrap().len())
            .finish()
    }
}
