use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::protocol::ProtocolLevel;

/// An immutable copy of a protocol attached to one evaluation.
///
/// Created by the snapshot engine at link time. The instance id is fresh —
/// distinct from the master protocol id — and `master_protocol_id` is kept
/// for traceability only: nothing is ever read back from the live protocol.
/// The snapshot collections under this document are write-once at link time
/// and read-only thereafter; they are removed only when the instance is
/// unlinked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedProtocolInstance {
    pub id: Uuid,
    pub master_protocol_id: Uuid,
    pub protocol_name: String,
    pub linked_at: jiff::Timestamp,
    pub levels_snapshot: Vec<ProtocolLevel>,
}

/// A frozen copy of one protocol task item, keyed within its instance by the
/// originating task item's id (`protocol_item_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshotRow {
    pub instance_id: Uuid,
    pub protocol_item_id: Uuid,
    pub level: u32,
    pub order: u32,
    pub item_number: String,
    pub name: String,
    pub skill: String,
    pub milestone: String,
    pub example: String,
    pub criterion: String,
    pub question: String,
    pub objective: String,
}

/// A frozen copy of one protocol scoring rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSnapshotRow {
    pub instance_id: Uuid,
    pub scoring_rule_id: Uuid,
    pub order: u32,
    pub kind: String,
    pub description: String,
    pub value: f64,
}
