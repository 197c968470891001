//! avalia-core
//!
//! Pure domain types and tenant-scoped document key conventions.
//! No storage dependency — this is the shared vocabulary of the avalia backend.

pub mod doc_keys;
pub mod models;
