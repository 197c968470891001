use serde::{Deserialize, Serialize};

use super::merged::MergedTaskRow;

/// The fully-merged structure handed to the report renderer.
/// Every field is addressable by name in a Tera template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub patient_name: String,
    pub patient_birth_date: String,
    pub evaluation_date: String,
    pub status: String,
    pub protocols: Vec<ProtocolSection>,
}

/// One linked protocol instance, grouped by level for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSection {
    pub protocol_name: String,
    pub linked_at: String,
    pub levels: Vec<LevelSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSection {
    pub level: u32,
    pub tasks: Vec<MergedTaskRow>,
}
