//! cloudinary-fs - Cloudinary storage behind a generic filesystem interface
//!
//! This library lets code written against a path-based filesystem contract
//! store its files as Cloudinary resources. Paths map one-to-one to resource
//! keys; directories are virtual and derived from the keys that contain them.
//!
//! # Core Concepts
//!
//! - **Filesystem contract**: [`FilesystemAdapter`] is the backend seam,
//!   [`Filesystem`] the caller-facing handle that cleans paths and shapes
//!   listings
//! - **Resource API**: [`api::ResourceApi`] is the small set of remote calls
//!   the adapter needs; [`api::CloudinaryClient`] speaks the real HTTP API and
//!   [`api::MockResourceApi`] keeps everything in memory
//! - **Metadata**: every entry is reported as a [`Metadata`] record, whether it
//!   is a stored file or a synthesised directory
//!
//! # Example Usage
//!
//! ```no_run
//! use cloudinary_fs::{CloudinaryAdapter, CloudinaryConfig, Filesystem, WriteOptions};
//!
//! async fn upload_report() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CLOUDINARY_URL or CLOUDINARY_CLOUD_NAME / _API_KEY / _API_SECRET
//!     let config = CloudinaryConfig::default();
//!     config.validate()?;
//!
//!     let fs = Filesystem::new(CloudinaryAdapter::from_config(&config)?);
//!     fs.write("reports/2024/q1.csv", b"a,b\n".to_vec(), &WriteOptions::default())
//!         .await?;
//!
//!     for entry in fs.list_contents("reports", false).await? {
//!         println!("{:?} {}", entry.entry_type, entry.path);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: filesystem contract, facade, data types and path rules
//! - [`adapter`]: the Cloudinary implementation of the contract
//! - [`api`]: remote client abstraction and implementations
//! - [`config`]: credentials and endpoints
//! - [`util`]: logging setup

pub mod adapter;
pub mod api;
pub mod config;
pub mod fs;
pub mod util;

pub use adapter::{normalize_metadata, CloudinaryAdapter};
pub use config::{CloudinaryConfig, ConfigError};
pub use fs::{
    ByteStream, EntryType, Filesystem, FilesystemAdapter, FsError, Metadata, Visibility,
    WriteOptions,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
