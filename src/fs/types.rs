//! Filesystem data types

use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::FsError;

/// Streamed file contents
pub type ByteStream = BoxStream<'static, Result<Bytes, FsError>>;

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

/// Normalised description of a file or synthesised directory
///
/// Only `entry_type` and `path` are guaranteed; the remaining fields are
/// whatever the remote service reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub path: String,
    pub size: Option<u64>,
    /// Creation time in seconds since the Unix epoch
    pub timestamp: Option<i64>,
    pub version: u64,
    pub mime_type: Option<String>,
}

impl Metadata {
    /// A file entry with no optional fields set
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            entry_type: EntryType::File,
            path: path.into(),
            size: None,
            timestamp: None,
            version: 1,
            mime_type: None,
        }
    }

    /// A directory entry
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            entry_type: EntryType::Dir,
            ..Self::file(path)
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

/// Access level of a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Options accepted by write-like operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace an existing resource instead of failing with `Conflict`
    pub overwrite: bool,
    pub visibility: Option<Visibility>,
}

impl WriteOptions {
    pub fn overwrite() -> Self {
        Self {
            overwrite: true,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}
