use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An AI-authored recommendation. The full set is replaced on every
/// successful insight generation; ids only need to be collision-free within
/// one stored generation, but UUIDs keep them globally unique anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub text: String,
    pub category: String,
    pub completed: bool,
    /// Estimated savings impact, 1 (low) to 3 (high).
    pub impact: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Recommendation {
    pub fn new(text: String, category: String, impact: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            category,
            completed: false,
            impact,
            created_at: String::new(),
            completed_at: None,
        }
    }
}
