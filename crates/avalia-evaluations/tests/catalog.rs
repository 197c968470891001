mod common;

use uuid::Uuid;

use avalia_core::models::protocol::{Protocol, ProtocolLevel, TaskItem};
use avalia_evaluations::{EvaluationError, catalog};
use avalia_storage::MemoryStore;

use common::{abc_scale, scope};

#[tokio::test]
async fn save_and_get_roundtrip() {
    let store = MemoryStore::new();
    let scope = scope();

    let mut protocol = abc_scale();
    catalog::save_protocol(&store, &scope, &mut protocol)
        .await
        .unwrap();

    let loaded = catalog::get_protocol(&store, &scope, protocol.id)
        .await
        .unwrap();
    assert_eq!(loaded.name, "ABC-Scale");
    assert_eq!(loaded.task_items, protocol.task_items);
    assert_eq!(loaded.scoring_rules, protocol.scoring_rules);
}

#[tokio::test]
async fn get_missing_protocol_is_not_found() {
    let store = MemoryStore::new();
    let scope = scope();

    let missing = Uuid::new_v4();
    let err = catalog::get_protocol(&store, &scope, missing)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::ProtocolNotFound(id) if id == missing));
}

#[tokio::test]
async fn list_sorts_by_name_and_filters_by_term() {
    let store = MemoryStore::new();
    let scope = scope();

    let mut vb = Protocol::new("VB-MAPP", "milestones");
    vb.description = "Verbal behavior milestones".to_string();
    catalog::save_protocol(&store, &scope, &mut vb).await.unwrap();

    let mut abc = abc_scale();
    catalog::save_protocol(&store, &scope, &mut abc)
        .await
        .unwrap();

    let all = catalog::list_protocols(&store, &scope, None).await.unwrap();
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["ABC-Scale", "VB-MAPP"]);

    let hits = catalog::list_protocols(&store, &scope, Some("verbal"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "VB-MAPP");

    let none = catalog::list_protocols(&store, &scope, Some("zzz"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn task_items_must_reference_a_defined_level() {
    let store = MemoryStore::new();
    let scope = scope();

    let mut protocol = Protocol::new("Broken", "milestones");
    protocol.levels.push(ProtocolLevel {
        order: 1,
        level: 1,
        age_range: String::new(),
    });
    protocol.task_items.push(TaskItem::new(2, 1, "2.1", "Orphaned item"));

    let err = catalog::save_protocol(&store, &scope, &mut protocol)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::InvalidProtocol(_)));

    // Nothing was written.
    let listed = catalog::list_protocols(&store, &scope, None).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn delete_removes_the_master_document() {
    let store = MemoryStore::new();
    let scope = scope();

    let mut protocol = abc_scale();
    catalog::save_protocol(&store, &scope, &mut protocol)
        .await
        .unwrap();
    catalog::delete_protocol(&store, &scope, protocol.id)
        .await
        .unwrap();

    let err = catalog::get_protocol(&store, &scope, protocol.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EvaluationError::ProtocolNotFound(_)));
}
