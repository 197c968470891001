mod common;

use uuid::Uuid;

use avalia_evaluations::{EvaluationError, catalog, lifecycle, snapshot};
use avalia_storage::MemoryStore;

use common::{scope, seed_evaluation, seed_patient, seed_protocol};

#[tokio::test]
async fn link_copies_levels_tasks_and_scoring() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;
    let protocol = seed_protocol(&store, &scope).await;

    let instance_id = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap();
    assert_ne!(instance_id, protocol.id);

    let instance = snapshot::get_instance(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    assert_eq!(instance.master_protocol_id, protocol.id);
    assert_eq!(instance.protocol_name, "ABC-Scale");
    assert_eq!(instance.levels_snapshot, protocol.levels);

    let tasks = snapshot::task_snapshot(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].protocol_item_id, protocol.task_items[0].id);
    assert_eq!(tasks[0].item_number, "1.1");
    assert_eq!(tasks[0].name, "Eye contact");

    let scoring = snapshot::scoring_snapshot(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    assert_eq!(scoring.len(), 1);
    assert_eq!(scoring[0].scoring_rule_id, protocol.scoring_rules[0].id);
    assert_eq!(scoring[0].value, 0.5);
}

#[tokio::test]
async fn editing_master_protocol_leaves_snapshot_unchanged() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;
    let mut protocol = seed_protocol(&store, &scope).await;

    let instance_id = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap();

    let before_tasks = snapshot::task_snapshot(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    let before_scoring =
        snapshot::scoring_snapshot(&store, &scope, patient, evaluation, instance_id)
            .await
            .unwrap();
    let before_levels = snapshot::get_instance(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap()
        .levels_snapshot;

    protocol.task_items[0].name = "Eye gaze".to_string();
    protocol.scoring_rules[0].value = 1.0;
    protocol.levels[0].age_range = "0-24 meses".to_string();
    catalog::save_protocol(&store, &scope, &mut protocol)
        .await
        .unwrap();

    let after_tasks = snapshot::task_snapshot(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    let after_scoring =
        snapshot::scoring_snapshot(&store, &scope, patient, evaluation, instance_id)
            .await
            .unwrap();
    let after_levels = snapshot::get_instance(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap()
        .levels_snapshot;

    assert_eq!(before_tasks, after_tasks);
    assert_eq!(before_scoring, after_scoring);
    assert_eq!(before_levels, after_levels);
    assert_eq!(after_tasks[0].name, "Eye contact");
}

#[tokio::test]
async fn deleting_master_protocol_keeps_instance_readable() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;
    let protocol = seed_protocol(&store, &scope).await;

    let instance_id = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap();

    catalog::delete_protocol(&store, &scope, protocol.id)
        .await
        .unwrap();

    let instance = snapshot::get_instance(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    assert_eq!(instance.protocol_name, "ABC-Scale");
    let tasks = snapshot::task_snapshot(&store, &scope, patient, evaluation, instance_id)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn linking_missing_protocol_is_not_found() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;

    let missing = Uuid::new_v4();
    let err = snapshot::link_protocol(&store, &scope, patient, evaluation, missing, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::ProtocolNotFound(id) if id == missing));
}

#[tokio::test]
async fn linking_to_missing_evaluation_is_not_found() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let protocol = seed_protocol(&store, &scope).await;

    let err = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        Uuid::new_v4(),
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EvaluationError::EvaluationNotFound(_)));
}

#[tokio::test]
async fn linking_to_finalized_evaluation_is_rejected() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;
    let protocol = seed_protocol(&store, &scope).await;

    lifecycle::finalize_evaluation(&store, &scope, patient, evaluation)
        .await
        .unwrap();

    let err = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EvaluationError::EvaluationFinalized(_)));
}

#[tokio::test]
async fn relinking_same_protocol_creates_independent_instances() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;
    let protocol = seed_protocol(&store, &scope).await;

    let first = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap();
    let second = snapshot::link_protocol(
        &store,
        &scope,
        patient,
        evaluation,
        protocol.id,
        &protocol.name,
    )
    .await
    .unwrap();
    assert_ne!(first, second);

    let details = lifecycle::get_evaluation_details(&store, &scope, patient, evaluation)
        .await
        .unwrap();
    assert_eq!(details.instances.len(), 2);
}

#[tokio::test]
async fn unlinking_missing_instance_is_not_found() {
    let store = MemoryStore::new();
    let scope = scope();
    let patient = seed_patient(&store, &scope).await;
    let evaluation = seed_evaluation(&store, &scope, patient).await;

    let err = snapshot::unlink_protocol(&store, &scope, patient, evaluation, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::InstanceNotFound(_)));
}
