//! Wire types exchanged with the resource API
//!
//! These mirror the JSON the Admin and Upload APIs return. Every field except
//! the identifier is optional: normalisation decides what a missing value means.

use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Number of resources requested per listing page
pub const LIST_PAGE_SIZE: u32 = 500;

/// Streamed body of a stored resource
pub type ApiByteStream = BoxStream<'static, Result<Bytes, ApiError>>;

/// A single stored resource as reported by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResource {
    /// Lookup key of the resource
    #[serde(alias = "public_id", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// RFC 3339 creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// File extension as detected by the service (e.g. "png")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// One of "image", "video" or "raw"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl RawResource {
    /// Creates a descriptor with only the key set
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes = Some(bytes);
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_format(
        mut self,
        resource_type: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.resource_type = Some(resource_type.into());
        self.format = Some(format.into());
        self
    }
}

/// Filters for a resource listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Only resources whose key starts with this prefix
    pub prefix: String,
    /// Maximum resources per page
    pub max_results: u32,
    /// Delivery type filter; always "upload" for this adapter
    pub delivery_type: String,
    /// Continuation token from the previous page
    pub next_cursor: Option<String>,
}

impl ListRequest {
    /// Creates a first-page request for active uploads under `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            max_results: LIST_PAGE_SIZE,
            delivery_type: "upload".to_string(),
            next_cursor: None,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(cursor.into());
        self
    }
}

/// One page of a resource listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePage {
    #[serde(default)]
    pub resources: Vec<RawResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Result of deleting a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    Ok,
    NotFound,
}

impl DestroyOutcome {
    /// Parses the `result` field of a destroy response
    pub fn parse(result: &str) -> Option<Self> {
        match result {
            "ok" => Some(DestroyOutcome::Ok),
            "not found" | "not_found" => Some(DestroyOutcome::NotFound),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_resource_accepts_public_id() {
        let json = r#"{
            "public_id": "docs/report",
            "bytes": 1024,
            "created_at": "2017-08-10T09:55:32Z",
            "version": 1502358932,
            "format": "pdf",
            "resource_type": "raw",
            "secure_url": "https://res.cloudinary.com/demo/raw/upload/docs/report"
        }"#;

        let resource: RawResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.path.as_deref(), Some("docs/report"));
        assert_eq!(resource.bytes, Some(1024));
        assert_eq!(resource.version, Some(1502358932));
    }

    #[test]
    fn test_raw_resource_missing_fields() {
        let resource: RawResource = serde_json::from_str(r#"{"path": "a.txt"}"#).unwrap();
        assert_eq!(resource, RawResource::new("a.txt"));
    }

    #[test]
    fn test_resource_page_without_cursor() {
        let page: ResourcePage =
            serde_json::from_str(r#"{"resources": [{"public_id": "x"}]}"#).unwrap();
        assert_eq!(page.resources.len(), 1);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_list_request_defaults() {
        let request = ListRequest::new("images/");
        assert_eq!(request.prefix, "images/");
        assert_eq!(request.max_results, 500);
        assert_eq!(request.delivery_type, "upload");
        assert!(request.next_cursor.is_none());

        let next = request.with_cursor("abc");
        assert_eq!(next.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_destroy_outcome_parse() {
        assert_eq!(DestroyOutcome::parse("ok"), Some(DestroyOutcome::Ok));
        assert_eq!(
            DestroyOutcome::parse("not found"),
            Some(DestroyOutcome::NotFound)
        );
        assert_eq!(DestroyOutcome::parse("weird"), None);
    }
}
