use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    InProgress,
    Finalized,
}

/// A dated assessment session for one patient.
///
/// Aggregates zero or more linked protocol instances; those live as child
/// documents under the evaluation's subtree, not inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: String,
    pub evaluation_date: jiff::civil::Date,
    pub status: EvaluationStatus,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
