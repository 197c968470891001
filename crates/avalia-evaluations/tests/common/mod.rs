#![allow(dead_code)]

use uuid::Uuid;

use avalia_core::doc_keys::TenantScope;
use avalia_core::models::patient::Patient;
use avalia_core::models::protocol::{Protocol, ProtocolLevel, ScoringRule, TaskItem};
use avalia_evaluations::{catalog, lifecycle, patients};
use avalia_storage::MemoryStore;

pub fn scope() -> TenantScope {
    TenantScope::new("clinic-test")
}

pub async fn seed_patient(store: &MemoryStore, scope: &TenantScope) -> Uuid {
    let mut patient = Patient::new("Ana Souza");
    patients::save_patient(store, scope, &mut patient)
        .await
        .unwrap();
    patient.id
}

/// A tiny milestones protocol: one level, one task ("1.1 Eye contact"),
/// one scoring rule.
pub fn abc_scale() -> Protocol {
    let mut protocol = Protocol::new("ABC-Scale", "milestones");
    protocol.levels.push(ProtocolLevel {
        order: 1,
        level: 1,
        age_range: "0-18 meses".to_string(),
    });
    let mut item = TaskItem::new(1, 1, "1.1", "Eye contact");
    item.question = "Makes eye contact when called by name?".to_string();
    item.criterion = "Holds gaze for two seconds".to_string();
    protocol.task_items.push(item);
    protocol
        .scoring_rules
        .push(ScoringRule::new(1, "milestone", "Emergent", 0.5));
    protocol
}

pub async fn seed_protocol(store: &MemoryStore, scope: &TenantScope) -> Protocol {
    let mut protocol = abc_scale();
    catalog::save_protocol(store, scope, &mut protocol)
        .await
        .unwrap();
    protocol
}

pub async fn seed_evaluation(store: &MemoryStore, scope: &TenantScope, patient_id: Uuid) -> Uuid {
    lifecycle::create_evaluation(
        store,
        scope,
        patient_id,
        "prof-1",
        jiff::civil::date(2026, 3, 10),
    )
    .await
    .unwrap()
}
