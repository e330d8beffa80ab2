//! Remote resource API
//!
//! This module provides the client abstraction the adapter talks to, the
//! Cloudinary HTTP implementation, and an in-memory implementation for tests.

mod client;
mod cloudinary;
mod error;
mod mock;
mod types;

pub use client::ResourceApi;
pub use cloudinary::{sign_params, CloudinaryClient};
pub use error::ApiError;
pub use mock::{ApiCall, MockResourceApi};
pub use types::{
    ApiByteStream, DestroyOutcome, ListRequest, RawResource, ResourcePage, LIST_PAGE_SIZE,
};
