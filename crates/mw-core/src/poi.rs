use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mw_terrain::Biome;
use serde::{Deserialize, Serialize};

use crate::ids::PoiId;

/// How an NPC regards strangers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Welcoming.
    Friendly,
    /// Indifferent.
    Neutral,
    /// Aggressive.
    Hostile,
    /// Could go either way.
    Unpredictable,
}

impl Alignment {
    /// All alignments.
    pub const ALL: [Alignment; 4] = [
        Alignment::Friendly,
        Alignment::Neutral,
        Alignment::Hostile,
        Alignment::Unpredictable,
    ];
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Friendly => write!(f, "friendly"),
            Self::Neutral => write!(f, "neutral"),
            Self::Hostile => write!(f, "hostile"),
            Self::Unpredictable => write!(f, "unpredictable"),
        }
    }
}

/// A character attached to a point of interest by a detail pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Short random identifier, e.g. `npc_3fa2b1c8`.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Occupation or role at the site.
    pub role: String,
    /// One-line description.
    pub description: String,
    /// Disposition.
    pub alignment: Alignment,
}

/// How much content a detail pass generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// One NPC, one rumor, no secrets.
    Low,
    /// Two NPCs, three rumors, one secret.
    #[default]
    Medium,
    /// Three NPCs, five rumors, two secrets.
    High,
}

impl DetailLevel {
    pub fn npc_count(self) -> usize {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn rumor_count(self) -> usize {
        match self {
            Self::Low => 1,
            Self::Medium => 3,
            Self::High => 5,
        }
    }

    pub fn secret_count(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown detail level: \"{other}\"")),
        }
    }
}

/// A named, located, detailable point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Unique identifier.
    pub id: PoiId,
    /// Free-form type tag (`settlement`, `ruin`, `temple`, ...).
    #[serde(rename = "type")]
    pub poi_type: String,
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Display name.
    pub name: String,
    /// Biome at creation.
    pub biome: Biome,
    /// Elevation at creation.
    pub elevation: f64,
    /// Prose description.
    pub description: String,
    /// Filled by a detail pass.
    pub npcs: Vec<Npc>,
    /// Filled by a detail pass.
    pub rumors: Vec<String>,
    /// Filled by a detail pass.
    pub secrets: Vec<String>,
    /// Other POIs this one links to.
    pub connections: Vec<PoiId>,
    /// Known to the players.
    pub discovered: bool,
    /// Detailed at least once.
    pub explored: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A partial update for a [`Poi`]. Absent fields leave the POI untouched.
///
/// Location and terrain snapshot are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoiPatch {
    /// New name.
    pub name: Option<String>,
    /// New type tag.
    #[serde(rename = "type", alias = "poi_type")]
    pub poi_type: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replace the NPC list.
    pub npcs: Option<Vec<Npc>>,
    /// Replace the rumor list.
    pub rumors: Option<Vec<String>>,
    /// Replace the secret list.
    pub secrets: Option<Vec<String>>,
    /// Replace the connection list.
    pub connections: Option<Vec<PoiId>>,
    /// Set the discovered flag.
    pub discovered: Option<bool>,
    /// Set the explored flag.
    pub explored: Option<bool>,
}

impl PoiPatch {
    /// Names of the fields this patch sets.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.poi_type.is_some() {
            fields.push("type");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.npcs.is_some() {
            fields.push("npcs");
        }
        if self.rumors.is_some() {
            fields.push("rumors");
        }
        if self.secrets.is_some() {
            fields.push("secrets");
        }
        if self.connections.is_some() {
            fields.push("connections");
        }
        if self.discovered.is_some() {
            fields.push("discovered");
        }
        if self.explored.is_some() {
            fields.push("explored");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}

impl Poi {
    /// Apply the fields present in `patch`.
    pub fn apply(&mut self, patch: PoiPatch) {
        let PoiPatch {
            name,
            poi_type,
            description,
            npcs,
            rumors,
            secrets,
            connections,
            discovered,
            explored,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(poi_type) = poi_type {
            self.poi_type = poi_type;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(npcs) = npcs {
            self.npcs = npcs;
        }
        if let Some(rumors) = rumors {
            self.rumors = rumors;
        }
        if let Some(secrets) = secrets {
            self.secrets = secrets;
        }
        if let Some(connections) = connections {
            self.connections = connections;
        }
        if let Some(discovered) = discovered {
            self.discovered = discovered;
        }
        if let Some(explored) = explored {
            self.explored = explored;
        }
    }
}
