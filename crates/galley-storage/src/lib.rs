//! Galley Storage Library
//!
//! Object-storage abstraction and implementations for Galley: the [`Storage`]
//! trait plus S3 and local-filesystem backends.
//!
//! # Storage key format
//!
//! Keys are bucket-scoped: `{bucket}/{filename}`, where the bucket is the
//! opaque category bucket from configuration and the filename is the
//! collision-resistant name generated by the upload pipeline. Keys must not
//! contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use galley_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
