use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evaluation::Evaluation;
use super::response::{ResponseStatus, ScoringResponse, TaskResponse};

/// One task snapshot row overlaid with its response, if any.
///
/// Static fields always come from the snapshot; a response can never
/// overwrite them. A row with no saved response reads as pending with an
/// empty `response_value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedTaskRow {
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
    pub response_value: String,
    pub additional_info: String,
    pub status: ResponseStatus,
    pub response_date: Option<jiff::Timestamp>,
}

/// Summary of one linked protocol instance, as shown on the evaluation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub instance_id: Uuid,
    pub master_protocol_id: Uuid,
    pub protocol_name: String,
    pub linked_at: jiff::Timestamp,
}

/// The full read model of one evaluation: the evaluation itself, its linked
/// instances (summary only), and every response across all instances.
/// Responses carry their `instance_id` so callers can regroup by protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub evaluation: Evaluation,
    pub instances: Vec<InstanceSummary>,
    pub task_responses: Vec<TaskResponse>,
    pub scoring_responses: Vec<ScoringResponse>,
}
