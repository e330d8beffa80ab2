//! Generic filesystem contract
//!
//! [`FilesystemAdapter`] is what a storage backend implements;
//! [`Filesystem`] is what callers use.

mod adapter;
mod error;
mod filesystem;
pub mod path;
mod types;

pub use adapter::FilesystemAdapter;
pub use error::FsError;
pub use filesystem::Filesystem;
pub use types::{ByteStream, EntryType, Metadata, Visibility, WriteOptions};
