use tracing::info;

use crate::error::StorageError;

/// Hierarchical document store: raw JSON bytes at `/`-separated keys.
///
/// Semantics every backend must provide:
/// - `put` is an unconditional overwrite (last write wins — no optimistic
///   concurrency tokens anywhere in this system);
/// - `delete` of a missing key succeeds;
/// - `list` returns keys in lexicographic order;
/// - there are no multi-document transactions. Multi-row copies and cascades
///   are loops over single-document calls, and a failure mid-loop leaves the
///   documents written so far in place.
#[allow(async_fn_in_trait)]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// All keys under `prefix`, lexicographically ordered.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Delete every document under `prefix`, one call per key. Best effort:
    /// an error aborts the loop with already-deleted documents staying gone.
    /// Returns the number of documents deleted.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, StorageError> {
        let keys = self.list(prefix).await?;
        let count = keys.len();
        for key in &keys {
            self.delete(key).await?;
        }
        info!(prefix = %prefix, count, "deleted documents under prefix");
        Ok(count)
    }
}
