use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Pending,
    Answered,
}

/// A clinician's recorded answer to one task snapshot row.
///
/// Keyed by `(instance_id, protocol_item_id)` — created implicitly the first
/// time an answer is saved, overwritten on every save after that. The
/// `response_value` semantics come from the originating task's question and
/// criterion; this record does not validate them. An empty string is a valid
/// answer (clears the response without reverting to pending).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub instance_id: Uuid,
    pub protocol_item_id: Uuid,
    pub response_value: String,
    pub additional_info: String,
    pub status: ResponseStatus,
    pub response_date: Option<jiff::Timestamp>,
}

/// A clinician's application of one scoring snapshot row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub instance_id: Uuid,
    pub scoring_rule_id: Uuid,
    pub applied: bool,
    pub applied_value: f64,
    pub applied_date: Option<jiff::Timestamp>,
}
