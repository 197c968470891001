//! Minimal patient registry.
//!
//! Just enough for the evaluation aggregate and the report header; the full
//! patient record (photos, anamnesis, contacts) lives elsewhere.

use tracing::info;
use uuid::Uuid;

use avalia_audit::AuditEvent;
use avalia_core::doc_keys::TenantScope;
use avalia_core::models::patient::Patient;
use avalia_storage::{DocumentStore, documents};

use crate::error::{EvaluationError, not_found_as};

pub async fn save_patient<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient: &mut Patient,
) -> Result<(), EvaluationError> {
    if patient.name.trim().is_empty() {
        return Err(EvaluationError::MissingField("name"));
    }

    patient.updated_at = jiff::Timestamp::now();
    documents::save_doc(store, &scope.patient(patient.id), patient).await?;

    info!(patient_id = %patient.id, "patient saved");
    AuditEvent::new(
        "save_patient",
        "patient",
        patient.id.to_string(),
        scope.tenant_id(),
    )
    .emit();
    Ok(())
}

pub async fn get_patient<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
    patient_id: Uuid,
) -> Result<Patient, EvaluationError> {
    documents::load_doc(store, &scope.patient(patient_id))
        .await
        .map_err(|e| not_found_as(e, EvaluationError::PatientNotFound(patient_id)))
}

/// All patients for the tenant, sorted by name.
pub async fn list_patients<S: DocumentStore>(
    store: &S,
    scope: &TenantScope,
) -> Result<Vec<Patient>, EvaluationError> {
    let mut patients: Vec<Patient> = documents::load_all(store, &scope.patients_prefix()).await?;
    patients.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(patients)
}
