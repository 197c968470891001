//! Document key conventions.
//!
//! Pure string functions — these define the canonical layout of documents in
//! the store. Every key is built through a [`TenantScope`], so no data-access
//! path can exist without naming the tenant that owns it.

use uuid::Uuid;

/// The tenant (clinic) a request acts on behalf of.
///
/// Threaded explicitly through every data-access call; there is no ambient
/// "current tenant". Constructed once per request from the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    tenant_id: String,
}

impl TenantScope {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn protocol(&self, protocol_id: Uuid) -> String {
        format!("tenants/{}/protocols/{protocol_id}.json", self.tenant_id)
    }

    pub fn protocols_prefix(&self) -> String {
        format!("tenants/{}/protocols/", self.tenant_id)
    }

    pub fn patient(&self, patient_id: Uuid) -> String {
        format!("tenants/{}/patients/{patient_id}.json", self.tenant_id)
    }

    pub fn patients_prefix(&self) -> String {
        format!("tenants/{}/patients/", self.tenant_id)
    }

    pub fn evaluation(&self, patient_id: Uuid, evaluation_id: Uuid) -> String {
        format!(
            "tenants/{}/patients/{patient_id}/evaluations/{evaluation_id}.json",
            self.tenant_id
        )
    }

    pub fn evaluations_prefix(&self, patient_id: Uuid) -> String {
        format!(
            "tenants/{}/patients/{patient_id}/evaluations/",
            self.tenant_id
        )
    }

    pub fn instance(&self, patient_id: Uuid, evaluation_id: Uuid, instance_id: Uuid) -> String {
        format!(
            "{}{instance_id}.json",
            self.instances_prefix(patient_id, evaluation_id)
        )
    }

    pub fn instances_prefix(&self, patient_id: Uuid, evaluation_id: Uuid) -> String {
        format!(
            "tenants/{}/patients/{patient_id}/evaluations/{evaluation_id}/instances/",
            self.tenant_id
        )
    }

    /// Prefix covering every child document of one instance: both snapshot
    /// collections and both response collections, but not the instance
    /// document itself.
    pub fn instance_subtree(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
    ) -> String {
        format!(
            "{}{instance_id}/",
            self.instances_prefix(patient_id, evaluation_id)
        )
    }

    pub fn task_snapshot_row(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
        protocol_item_id: Uuid,
    ) -> String {
        format!(
            "{}tasks/{protocol_item_id}.json",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn task_snapshot_prefix(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
    ) -> String {
        format!(
            "{}tasks/",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn scoring_snapshot_row(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
        scoring_rule_id: Uuid,
    ) -> String {
        format!(
            "{}scoring/{scoring_rule_id}.json",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn scoring_snapshot_prefix(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
    ) -> String {
        format!(
            "{}scoring/",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn task_response(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
        protocol_item_id: Uuid,
    ) -> String {
        format!(
            "{}task-responses/{protocol_item_id}.json",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn task_responses_prefix(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
    ) -> String {
        format!(
            "{}task-responses/",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn scoring_response(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
        scoring_rule_id: Uuid,
    ) -> String {
        format!(
            "{}scoring-responses/{scoring_rule_id}.json",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }

    pub fn scoring_responses_prefix(
        &self,
        patient_id: Uuid,
        evaluation_id: Uuid,
        instance_id: Uuid,
    ) -> String {
        format!(
            "{}scoring-responses/",
            self.instance_subtree(patient_id, evaluation_id, instance_id)
        )
    }
}
