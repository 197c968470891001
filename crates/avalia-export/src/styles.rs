use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text.
    pub body_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points.
    pub heading1_size: usize,

    /// Heading 2 font size in points.
    pub heading2_size: usize,

    /// Heading 3 font size in points.
    pub heading3_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        // Matches the clinic's printed report look.
        Self {
            body_font: "Helvetica".to_string(),
            body_size: 10,
            heading1_size: 18,
            heading2_size: 14,
            heading3_size: 12,
        }
    }
}
