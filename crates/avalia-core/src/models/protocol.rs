use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clinical assessment template, editable by admins.
///
/// The protocol document embeds all of its ordered child collections. Task
/// items and scoring rules carry ids assigned at authoring time; those ids
/// are copied into evaluation snapshots as traceability keys and are the
/// only link back to the template. Editing or deleting a protocol never
/// touches snapshots already taken from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protocol {
    pub id: Uuid,
    pub name: String,
    pub protocol_type: String,
    pub description: String,
    pub estimated_duration_minutes: Option<u32>,
    pub active: bool,
    pub stages: Vec<Stage>,
    pub levels: Vec<ProtocolLevel>,
    pub skill_items: Vec<SkillItem>,
    pub scoring_rules: Vec<ScoringRule>,
    pub task_items: Vec<TaskItem>,
    pub general_notes: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Protocol {
    pub fn new(name: impl Into<String>, protocol_type: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            protocol_type: protocol_type.into(),
            description: String::new(),
            estimated_duration_minutes: None,
            active: true,
            stages: Vec::new(),
            levels: Vec::new(),
            skill_items: Vec::new(),
            scoring_rules: Vec::new(),
            task_items: Vec::new(),
            general_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An authoring stage of the protocol (name/description pairs shown on the
/// template form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub description: String,
}

/// One level of the protocol (e.g. VB-MAPP levels 1–3), with the age range
/// it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolLevel {
    pub order: u32,
    pub level: u32,
    pub age_range: String,
}

/// An ordered skill name within the protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillItem {
    pub order: u32,
    pub name: String,
}

/// One scoring rule (description/value/type triple).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub id: Uuid,
    pub order: u32,
    pub kind: String,
    pub description: String,
    pub value: f64,
}

impl ScoringRule {
    pub fn new(
        order: u32,
        kind: impl Into<String>,
        description: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order,
            kind: kind.into(),
            description: description.into(),
            value,
        }
    }
}

/// One assessable task of the protocol.
///
/// `level` must name a level present in the owning protocol's `levels` at
/// authoring time (validated on save, not retroactively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
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

impl TaskItem {
    pub fn new(
        level: u32,
        order: u32,
        item_number: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            order,
            item_number: item_number.into(),
            name: name.into(),
            skill: String::new(),
            milestone: String::new(),
            example: String::new(),
            criterion: String::new(),
            question: String::new(),
            objective: String::new(),
        }
    }
}
