//! Protocol catalog: the mutable, admin-edited assessment templates.
//!
//! Nothing here touches evaluation subtrees. Snapshots taken from a protocol
//! are independent copies, so edits and deletes in this module never affect
//! an existing evaluation.

use std::collections::HashSet;

use tracing::info;
use uuid::Uuid;

use avalia_audit::AuditEvent;
use avalia_core::doc_keys::TenantScope;
use avalia_core::models::protocol::Protocol;
use avalia_storage::{DocumentStore, documents};

use crate::error::{EvaluationError, not_found_as};

/// Upsert a protocol document, bumping its `updated_at`.
///
/// Authoring-time invariant: every task item must reference a level defined
/// on the protocol. This is checked here and only here — rows already
/// snapshotted into evaluations are never re-validated.
pub async fn save_protocol<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    protocol: &mut Protocol,
) -> Result<(), EvaluationError> {
    validate_level_refs(protocol)?;

    protocol.updated_at = jiff::Timestamp::now();
    documents::save_doc(store, &scope.protocol(protocol.id), protocol).await?;

    info!(protocol_id = %protocol.id, name = %protocol.name, "protocol saved");
    AuditEvent::new(
        "save_protocol",
        "protocol",
        protocol.id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

pub async fn get_protocol<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    protocol_id: Uuid,
) -> Result<Protocol, EvaluationError> {
    documents::load_doc(store, &scope.protocol(protocol_id))
        .await
        .map_err(|e| not_found_as(e, EvaluationError::ProtocolNotFound(protocol_id)))
}

/// All protocols for the tenant, sorted by name, optionally filtered by a
/// case-insensitive search term over name and description. Filtering happens
/// in memory; the catalog is small.
pub async fn list_protocols<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    search_term: Option<&str>,
) -> Result<Vec<Protocol>, EvaluationError> {
    let mut protocols: Vec<Protocol> =
        documents::load_all(store, &scope.protocols_prefix()).await?;

    if let Some(term) = search_term {
        let term = term.to_lowercase();
        protocols.retain(|p| {
            p.name.to_lowercase().contains(&term) || p.description.to_lowercase().contains(&term)
        });
    }

    protocols.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(protocols)
}

/// Delete the master template. Existing linked instances keep their
/// snapshots and stay fully readable.
pub async fn delete_protocol<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    protocol_id: Uuid,
) -> Result<(), EvaluationError> {
    store.delete(&scope.protocol(protocol_id)).await?;

    info!(protocol_id = %protocol_id, "protocol deleted");
    AuditEvent::new(
        "delete_protocol",
        "protocol",
        protocol_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

fn validate_level_refs(protocol: &Protocol) -> Result<(), EvaluationError> {
    let defined: HashSet<u32> = protocol.levels.iter().map(|l| l.level).collect();
    for item in &protocol.task_items {
        if !defined.contains(&item.level) {
            return Err(EvaluationError::InvalidProtocol(format!(
                "task item {} references level {}, which the protocol does not define",
                item.item_number, item.level
            )));
        }
    }
    Ok(())
}
