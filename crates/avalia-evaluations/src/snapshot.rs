//! Snapshot engine: copy-on-link materialization of a protocol into an
//! evaluation.
//!
//! The protocol is treated as a versioned template and the linked instance
//! as a value-type deep copy taken at a point in time. Every child row is
//! written as an independent document; the only reference back to the live
//! template is the traceability id (`master_protocol_id`, and per row the
//! originating item/rule id). After `link_protocol` returns, the instance
//! subtree is self-contained: the source protocol can be edited or deleted
//! with no effect on it.

use tracing::{info, warn};
use uuid::Uuid;

use avalia_audit::AuditEvent;
use avalia_core::doc_keys::TenantScope;
use avalia_core::models::evaluation::{Evaluation, EvaluationStatus};
use avalia_core::models::instance::{LinkedProtocolInstance, ScoringSnapshotRow, TaskSnapshotRow};
use avalia_core::models::protocol::Protocol;
use avalia_storage::{DocumentStore, documents};

use crate::error::{EvaluationError, not_found_as};

/// Deep-copy the protocol's current levels, task items and scoring rules
/// into a fresh linked instance under the evaluation. Returns the new
/// instance id.
///
/// Write order is parent document, then task rows, then scoring rows. There
/// is no multi-document transaction: a store failure mid-loop leaves a
/// partially populated snapshot in place, which is logged and surfaced to
/// the caller.
pub async fn link_protocol<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    protocol_id: Uuid,
    protocol_name: &str,
) -> Result<Uuid, EvaluationError> {
    let evaluation: Evaluation =
        documents::load_doc(store, &scope.evaluation(patient_id, evaluation_id))
            .await
            .map_err(|e| not_found_as(e, EvaluationError::EvaluationNotFound(evaluation_id)))?;
    if evaluation.status == EvaluationStatus::Finalized {
        return Err(EvaluationError::EvaluationFinalized(evaluation_id));
    }

    // One read of the full template; everything after this line works on
    // copies.
    let protocol: Protocol = documents::load_doc(store, &scope.protocol(protocol_id))
        .await
        .map_err(|e| not_found_as(e, EvaluationError::ProtocolNotFound(protocol_id)))?;

    let instance = LinkedProtocolInstance {
        id: Uuid::new_v4(),
        master_protocol_id: protocol_id,
        protocol_name: protocol_name.to_string(),
        linked_at: jiff::Timestamp::now(),
        levels_snapshot: protocol.levels.clone(),
    };

    documents::save_doc(
        store,
        &scope.instance(patient_id, evaluation_id, instance.id),
        &instance,
    )
    .await
    .inspect_err(|e| warn!(instance_id = %instance.id, error = %e, "instance write failed"))?;

    for item in &protocol.task_items {
        let row = TaskSnapshotRow {
            instance_id: instance.id,
            protocol_item_id: item.id,
            level: item.level,
            order: item.order,
            item_number: item.item_number.clone(),
            name: item.name.clone(),
            skill: item.skill.clone(),
            milestone: item.milestone.clone(),
            example: item.example.clone(),
            criterion: item.criterion.clone(),
            question: item.question.clone(),
            objective: item.objective.clone(),
        };
        documents::save_doc(
            store,
            &scope.task_snapshot_row(patient_id, evaluation_id, instance.id, item.id),
            &row,
        )
        .await
        .inspect_err(
            |e| warn!(instance_id = %instance.id, error = %e, "partial task snapshot"),
        )?;
    }

    for rule in &protocol.scoring_rules {
        let row = ScoringSnapshotRow {
            instance_id: instance.id,
            scoring_rule_id: rule.id,
            order: rule.order,
            kind: rule.kind.clone(),
            description: rule.description.clone(),
            value: rule.value,
        };
        documents::save_doc(
            store,
            &scope.scoring_snapshot_row(patient_id, evaluation_id, instance.id, rule.id),
            &row,
        )
        .await
        .inspect_err(
            |e| warn!(instance_id = %instance.id, error = %e, "partial scoring snapshot"),
        )?;
    }

    info!(
        instance_id = %instance.id,
        protocol_id = %protocol_id,
        evaluation_id = %evaluation_id,
        tasks = protocol.task_items.len(),
        scoring_rules = protocol.scoring_rules.len(),
        "protocol linked to evaluation"
    );
    AuditEvent::new(
        "link_protocol",
        "protocol_instance",
        instance.id.to_string(),
        scope.tenant_id(),
    )
    .with_details(serde_json::json!({
        "protocol_id": protocol_id,
        "evaluation_id": evaluation_id,
    }))
    .emit();

    Ok(instance.id)
}

/// Remove a linked instance and everything recorded against it.
///
/// Cascades over four collections (task snapshot, scoring snapshot, task
/// responses, scoring responses) before deleting the instance document
/// itself, so a failure can orphan at worst the parent document, never a
/// response row. Best effort — no transaction.
pub async fn unlink_protocol<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
) -> Result<(), EvaluationError> {
    let instance_key = scope.instance(patient_id, evaluation_id, instance_id);
    documents::load_doc::<LinkedProtocolInstance, _>(store, &instance_key)
        .await
        .map_err(|e| not_found_as(e, EvaluationError::InstanceNotFound(instance_id)))?;

    let deleted = store
        .delete_prefix(&scope.instance_subtree(patient_id, evaluation_id, instance_id))
        .await?;
    store.delete(&instance_key).await?;

    info!(instance_id = %instance_id, rows = deleted, "protocol unlinked from evaluation");
    AuditEvent::new(
        "unlink_protocol",
        "protocol_instance",
        instance_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

pub async fn get_instance<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
) -> Result<LinkedProtocolInstance, EvaluationError> {
    documents::load_doc(store, &scope.instance(patient_id, evaluation_id, instance_id))
        .await
        .map_err(|e| not_found_as(e, EvaluationError::InstanceNotFound(instance_id)))
}

/// The frozen task rows of one instance, ordered by level then item number
/// (item numbers sort lexicographically, matching the store's own ordering).
pub async fn task_snapshot<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
) -> Result<Vec<TaskSnapshotRow>, EvaluationError> {
    let mut rows: Vec<TaskSnapshotRow> = documents::load_all(
        store,
        &scope.task_snapshot_prefix(patient_id, evaluation_id, instance_id),
    )
    .await?;
    rows.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.item_number.cmp(&b.item_number))
    });
    Ok(rows)
}

/// The frozen scoring rows of one instance, in authoring order.
pub async fn scoring_snapshot<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
) -> Result<Vec<ScoringSnapshotRow>, EvaluationError> {
    let mut rows: Vec<ScoringSnapshotRow> = documents::load_all(
        store,
        &scope.scoring_snapshot_prefix(patient_id, evaluation_id, instance_id),
    )
    .await?;
    rows.sort_by_key(|r| r.order);
    Ok(rows)
}
