use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<jiff::civil::Date>,
    pub notes: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            birth_date: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
