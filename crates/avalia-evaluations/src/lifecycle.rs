//! Evaluation lifecycle: create, list, finalize, delete, and the full read
//! model.

use tracing::info;
use uuid::Uuid;

use avalia_audit::AuditEvent;
use avalia_core::doc_keys::TenantScope;
use avalia_core::models::evaluation::{Evaluation, EvaluationStatus};
use avalia_core::models::instance::LinkedProtocolInstance;
use avalia_core::models::merged::{EvaluationDetails, InstanceSummary};
use avalia_core::models::response::{ScoringResponse, TaskResponse};
use avalia_storage::{DocumentStore, documents};

use crate::error::{EvaluationError, not_found_as};
use crate::patients;
use crate::snapshot;

/// Create a new in-progress evaluation for a patient. Returns its id.
pub async fn create_evaluation<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    professional_id: &str,
    evaluation_date: jiff::civil::Date,
) -> Result<Uuid, EvaluationError> {
    if professional_id.is_empty() {
        return Err(EvaluationError::MissingField("professional_id"));
    }
    patients::get_patient(store, scope, patient_id).await?;

    let now = jiff::Timestamp::now();
    let evaluation = Evaluation {
        id: Uuid::new_v4(),
        patient_id,
        professional_id: professional_id.to_string(),
        evaluation_date,
        status: EvaluationStatus::InProgress,
        created_at: now,
        updated_at: now,
    };
    documents::save_doc(
        store,
        &scope.evaluation(patient_id, evaluation.id),
        &evaluation,
    )
    .await?;

    info!(evaluation_id = %evaluation.id, patient_id = %patient_id, "evaluation created");
    AuditEvent::new(
        "create_evaluation",
        "evaluation",
        evaluation.id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(evaluation.id)
}

pub async fn get_evaluation<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
) -> Result<Evaluation, EvaluationError> {
    documents::load_doc(store, &scope.evaluation(patient_id, evaluation_id))
        .await
        .map_err(|e| not_found_as(e, EvaluationError::EvaluationNotFound(evaluation_id)))
}

/// All evaluations of one patient, newest evaluation date first.
pub async fn get_patient_evaluations<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
) -> Result<Vec<Evaluation>, EvaluationError> {
    let mut evaluations: Vec<Evaluation> =
        documents::load_all(store, &scope.evaluations_prefix(patient_id)).await?;
    evaluations.sort_by(|a, b| b.evaluation_date.cmp(&a.evaluation_date));
    Ok(evaluations)
}

/// Mark an evaluation finalized. Linking and response editing are rejected
/// from here on; the record is now a stable clinical document.
pub async fn finalize_evaluation<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
) -> Result<(), EvaluationError> {
    let mut evaluation = get_evaluation(store, scope, patient_id, evaluation_id).await?;
    evaluation.status = EvaluationStatus::Finalized;
    evaluation.updated_at = jiff::Timestamp::now();
    documents::save_doc(
        store,
        &scope.evaluation(patient_id, evaluation_id),
        &evaluation,
    )
    .await?;

    info!(evaluation_id = %evaluation_id, "evaluation finalized");
    AuditEvent::new(
        "finalize_evaluation",
        "evaluation",
        evaluation_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

/// Delete an evaluation and everything under it: each linked instance is
/// unlink-cascaded (responses and snapshot rows first), then the evaluation
/// document itself goes. Best effort, same as unlinking.
pub async fn delete_evaluation<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
) -> Result<(), EvaluationError> {
    get_evaluation(store, scope, patient_id, evaluation_id).await?;

    let instances: Vec<LinkedProtocolInstance> =
        documents::load_all(store, &scope.instances_prefix(patient_id, evaluation_id)).await?;
    for instance in &instances {
        snapshot::unlink_protocol(store, scope, patient_id, evaluation_id, instance.id).await?;
    }
    store
        .delete(&scope.evaluation(patient_id, evaluation_id))
        .await?;

    info!(
        evaluation_id = %evaluation_id,
        instances = instances.len(),
        "evaluation deleted"
    );
    AuditEvent::new(
        "delete_evaluation",
        "evaluation",
        evaluation_id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

/// The full read model: the evaluation, its instance summaries (ordered by
/// link time), and every task and scoring response across all instances.
/// Each response carries its `instance_id`, so callers can regroup by
/// protocol.
pub async fn get_evaluation_details<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
    evaluation_id: Uuid,
) -> Result<EvaluationDetails, EvaluationError> {
    let evaluation = get_evaluation(store, scope, patient_id, evaluation_id).await?;

    let mut instances: Vec<LinkedProtocolInstance> =
        documents::load_all(store, &scope.instances_prefix(patient_id, evaluation_id)).await?;
    instances.sort_by_key(|i| i.linked_at);

    let mut task_responses: Vec<TaskResponse> = Vec::new();
    let mut scoring_responses: Vec<ScoringResponse> = Vec::new();
    for instance in &instances {
        let mut tasks: Vec<TaskResponse> = documents::load_all(
            store,
            &scope.task_responses_prefix(patient_id, evaluation_id, instance.id),
        )
        .await?;
        task_responses.append(&mut tasks);

        let mut scoring: Vec<ScoringResponse> = documents::load_all(
            store,
            &scope.scoring_responses_prefix(patient_id, evaluation_id, instance.id),
        )
        .await?;
        scoring_responses.append(&mut scoring);
    }

    let instances = instances
        .into_iter()
        .map(|i| InstanceSummary {
            instance_id: i.id,
            master_protocol_id: i.master_protocol_id,
            protocol_name: i.protocol_name,
            linked_at: i.linked_at,
        })
        .collect();

    Ok(EvaluationDetails {
        evaluation,
        instances,
        task_responses,
        scoring_responses,
    })
}
