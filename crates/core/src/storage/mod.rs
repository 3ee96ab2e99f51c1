//! Blob storage access.
//!
//! [`BlobLocator`] and [`ContainerLocator`] are parsed out of request URLs;
//! the [`BlobStore`] trait moves bytes between remote blobs and local files.
//! [`AzureBlobClient`] is the production implementation against the Azure
//! Blob REST API.

mod azure;
mod config;
mod error;
mod locator;
mod traits;

pub use azure::*;
pub use config::*;
pub use error::*;
pub use locator::*;
pub use traits::*;
