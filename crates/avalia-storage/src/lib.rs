//! avalia-storage
//!
//! The tenant-scoped document store: raw JSON documents at hierarchical keys.
//! One trait, two backends (S3 for production, in-memory for tests and local
//! runs), and typed serde helpers on top.

pub mod documents;
pub mod error;
pub mod memory;
pub mod s3;
pub mod store;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::DocumentStore;
