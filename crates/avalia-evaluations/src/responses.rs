//! Response recorder: clinician answers against frozen snapshot rows.
//!
//! Responses live in their own collections keyed by the snapshot row's
//! originating id, so recording an answer never mutates the snapshot, and
//! re-saving the same row overwrites one document instead of growing a list.

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use avalia_audit::AuditEvent;
use avalia_core::doc_keys::TenantScope;
use avalia_core::models::evaluation::{Evaluation, EvaluationStatus};
use avalia_core::models::instance::{ScoringSnapshotRow, TaskSnapshotRow};
use avalia_core::models::merged::MergedTaskRow;
use avalia_core::models::response::{ResponseStatus, ScoringResponse, TaskResponse};
use avalia_storage::{DocumentStore, documents};

use crate::error::{EvaluationError, not_found_as};
use crate::snapshot;

/// Record (or overwrite) the answer to one task snapshot row.
///
/// `response_value: None` means the field was absent from the request and is
/// rejected before any store access. `Some("")` is a valid answer — it
/// clears the text while keeping the row answered.
pub async fn save_task_response<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
    protocol_item_id: Uuid,
    response_value: Option<&str>,
    additional_info: &str,
) -> Result<(), EvaluationError> {
    let response_value =
        response_value.ok_or(EvaluationError::MissingField("response_value"))?;

    require_editable(store, scope, patient_id, evaluation_id).await?;

    // The composite key must name a real row of this instance's snapshot.
    documents::load_doc::<TaskSnapshotRow, _>(
        store,
        &scope.task_snapshot_row(patient_id, evaluation_id, instance_id, protocol_item_id),
    )
    .await
    .map_err(|e| {
        not_found_as(
            e,
            EvaluationError::UnknownTaskItem {
                instance_id,
                protocol_item_id,
            },
        )
    })?;

    let response = TaskResponse {
        instance_id,
        protocol_item_id,
        response_value: response_value.to_string(),
        additional_info: additional_info.to_string(),
        status: ResponseStatus::Answered,
        response_date: Some(jiff::Timestamp::now()),
    };
    documents::save_doc(
        store,
        &scope.task_response(patient_id, evaluation_id, instance_id, protocol_item_id),
        &response,
    )
    .await?;

    info!(
        instance_id = %instance_id,
        protocol_item_id = %protocol_item_id,
        "task response saved"
    );
    AuditEvent::new(
        "save_task_response",
        "task_response",
        protocol_item_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

/// Record (or overwrite) the application of one scoring snapshot row.
/// Saving implies `applied = true`.
pub async fn save_scoring_response<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
    scoring_rule_id: Uuid,
    applied_value: f64,
) -> Result<(), EvaluationError> {
    require_editable(store, scope, patient_id, evaluation_id).await?;

    documents::load_doc::<ScoringSnapshotRow, _>(
        store,
        &scope.scoring_snapshot_row(patient_id, evaluation_id, instance_id, scoring_rule_id),
    )
    .await
    .map_err(|e| {
        not_found_as(
            e,
            EvaluationError::UnknownScoringRule {
                instance_id,
                scoring_rule_id,
            },
        )
    })?;

    let response = ScoringResponse {
        instance_id,
        scoring_rule_id,
        applied: true,
        applied_value,
        applied_date: Some(jiff::Timestamp::now()),
    };
    documents::save_doc(
        store,
        &scope.scoring_response(patient_id, evaluation_id, instance_id, scoring_rule_id),
        &response,
    )
    .await?;

    info!(
        instance_id = %instance_id,
        scoring_rule_id = %scoring_rule_id,
        "scoring response saved"
    );
    AuditEvent::new(
        "save_scoring_response",
        "scoring_response",
        scoring_rule_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

/// The displayable task list of one instance: every snapshot row, with its
/// response overlaid when one exists.
///
/// Two reads (snapshot rows + response collection), merged by
/// `protocol_item_id`. Static fields always come from the snapshot; rows
/// without a response default to pending with an empty value. Ordered by
/// level, then item number.
pub async fn merged_task_view<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
    instance_id: Uuid,
) -> Result<Vec<MergedTaskRow>, EvaluationError> {
    snapshot::get_instance(store, scope, patient_id, evaluation_id, instance_id).await?;

    let rows = snapshot::task_snapshot(store, scope, patient_id, evaluation_id, instance_id).await?;
    let responses: Vec<TaskResponse> = documents::load_all(
        store,
        &scope.task_responses_prefix(patient_id, evaluation_id, instance_id),
    )
    .await?;
    let by_item: HashMap<Uuid, TaskResponse> = responses
        .into_iter()
        .map(|r| (r.protocol_item_id, r))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let response = by_item.get(&row.protocol_item_id);
            MergedTaskRow {
                instance_id: row.instance_id,
                protocol_item_id: row.protocol_item_id,
                level: row.level,
                order: row.order,
                item_number: row.item_number,
                name: row.name,
                skill: row.skill,
                milestone: row.milestone,
                example: row.example,
                criterion: row.criterion,
                question: row.question,
                objective: row.objective,
                response_value: response.map(|r| r.response_value.clone()).unwrap_or_default(),
                additional_info: response.map(|r| r.additional_info.clone()).unwrap_or_default(),
                status: response.map(|r| r.status).unwrap_or(ResponseStatus::Pending),
                response_date: response.and_then(|r| r.response_date),
            }
        })
        .collect())
}

async fn require_editable<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
) -> Result<(), EvaluationError> {
    let evaluation: Evaluation =
        documents::load_doc(store, &scope.evaluation(patient_id, evaluation_id))
            .await
            .map_err(|e| not_found_as(e, EvaluationError::EvaluationNotFound(evaluation_id)))?;
    if evaluation.status == EvaluationStatus::Finalized {
        return Err(EvaluationError::EvaluationFinalized(evaluation_id));
    }
    Ok(())
}
