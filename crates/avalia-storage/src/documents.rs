//! Typed JSON document helpers on top of [`DocumentStore`].

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::DocumentStore;

/// Load and deserialize one document.
pub async fn load_doc<T, S>(store: &S, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    S: DocumentStore,
{
    let body = store.get(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Serialize and store one document.
pub async fn save_doc<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: DocumentStore,
{
    let body = serde_json::to_vec_pretty(value)?;
    store.put(key, body).await
}

/// Load every direct child document of `prefix`, in key order.
///
/// Nested subtrees are skipped: `prefix` + `{id}.json` is a direct child,
/// `prefix` + `{id}/...` is not. This is how a collection is read without
/// pulling in its documents' own child collections.
pub async fn load_all<T, S>(store: &S, prefix: &str) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: DocumentStore,
{
    let keys = store.list(prefix).await?;
    let mut docs = Vec::new();
    for key in keys.iter().filter(|k| is_direct_child(k, prefix)) {
        let body = store.get(key).await?;
        docs.push(serde_json::from_slice(&body)?);
    }
    Ok(docs)
}

fn is_direct_child(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| !rest.contains('/'))
}
