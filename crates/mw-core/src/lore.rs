use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::LoreId;

/// Lore type used when the caller does not name one.
pub const DEFAULT_LORE_TYPE: &str = "creation_myth";

/// A piece of generated world lore. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: LoreId,
    /// `creation_myth`, `historical_event`, `legend`, or any free-form tag.
    #[serde(rename = "type")]
    pub lore_type: String,
    pub title: String,
    pub content: String,
    pub themes: Vec<String>,
    pub created_at: DateTime<Utc>,
}
