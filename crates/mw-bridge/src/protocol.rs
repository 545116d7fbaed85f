//! Wire types for the JSON-lines command protocol.
//!
//! A request is one JSON object per line:
//!
//! ```json
//! {"id": 1, "tool": "create_poi", "arguments": {"world_id": "…", "x": 3, "y": 4}}
//! ```
//!
//! `arguments` may also be spelled `params`. Every request gets exactly one
//! response line echoing `id` and `tool`.

use mw_core::{DEFAULT_EVENT_TYPE, DEFAULT_LORE_TYPE, DetailLevel, PoiId, PoiPatch, RegionName, WorldId};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Default POI type for `create_poi`.
pub const DEFAULT_POI_TYPE: &str = "settlement";
/// Default fraction of cells returned by `suggest_poi_sites`.
pub const DEFAULT_SITE_DENSITY: f64 = 0.01;
/// Default world side length for `create_world`.
pub const DEFAULT_WORLD_SIZE: i64 = 64;

/// Every tool name the bridge accepts.
pub const TOOL_NAMES: &[&str] = &[
    "create_world",
    "get_world",
    "get_statistics",
    "get_region",
    "name_region",
    "describe_region",
    "batch_name_regions",
    "list_pois",
    "get_poi",
    "create_poi",
    "update_poi",
    "detail_poi",
    "generate_world_lore",
    "list_lore",
    "add_historical_event",
    "get_timeline",
    "suggest_poi_sites",
    "save_world",
    "load_world",
    "list_worlds",
    "delete_world",
];

/// One request line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Opaque correlation id, echoed in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub tool: String,
    #[serde(default, alias = "params")]
    pub arguments: Value,
}

impl ToolRequest {
    pub fn new(tool: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            tool: tool.into(),
            arguments,
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Machine-readable failure carried by an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: String,
    pub message: String,
}

impl From<&BridgeError> for ToolError {
    fn from(err: &BridgeError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub status: ToolStatus,
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResponse {
    pub fn success(id: Option<Value>, tool: impl Into<String>, result: Value) -> Self {
        Self {
            id,
            status: ToolStatus::Success,
            tool: tool.into(),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, tool: impl Into<String>, err: &BridgeError) -> Self {
        Self {
            id,
            status: ToolStatus::Error,
            tool: tool.into(),
            result: None,
            error: Some(ToolError::from(err)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

fn default_size() -> i64 {
    DEFAULT_WORLD_SIZE
}

fn default_true() -> bool {
    true
}

fn default_poi_type() -> String {
    DEFAULT_POI_TYPE.to_string()
}

fn default_lore_type() -> String {
    DEFAULT_LORE_TYPE.to_string()
}

fn default_event_type() -> String {
    DEFAULT_EVENT_TYPE.to_string()
}

fn default_density() -> f64 {
    DEFAULT_SITE_DENSITY
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateWorldArgs {
    #[serde(default = "default_size")]
    pub width: i64,
    #[serde(default = "default_size")]
    pub height: i64,
    /// Random when absent.
    #[serde(default, deserialize_with = "seed")]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub island_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldArgs {
    pub world_id: WorldId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetWorldArgs {
    pub world_id: WorldId,
    /// Include the elevation, moisture and biome grids and the mesh.
    #[serde(default)]
    pub include_terrain: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionArgs {
    pub world_id: WorldId,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NameRegionArgs {
    pub world_id: WorldId,
    pub x: i64,
    pub y: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchNameArgs {
    pub world_id: WorldId,
    #[serde(default)]
    pub regions: Vec<RegionName>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoiArgs {
    pub world_id: WorldId,
    #[serde(deserialize_with = "poi_id")]
    pub poi_id: PoiId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePoiArgs {
    pub world_id: WorldId,
    #[serde(default = "default_poi_type")]
    pub poi_type: String,
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatePoiArgs {
    pub world_id: WorldId,
    #[serde(deserialize_with = "poi_id")]
    pub poi_id: PoiId,
    pub updates: PoiPatch,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailPoiArgs {
    pub world_id: WorldId,
    #[serde(deserialize_with = "poi_id")]
    pub poi_id: PoiId,
    #[serde(default)]
    pub detail_level: DetailLevel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoreArgs {
    pub world_id: WorldId,
    #[serde(default = "default_lore_type")]
    pub lore_type: String,
    #[serde(default)]
    pub themes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListLoreArgs {
    pub world_id: WorldId,
    #[serde(default)]
    pub lore_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetTimelineArgs {
    pub world_id: WorldId,
    #[serde(default)]
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalEventArgs {
    pub world_id: WorldId,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestSitesArgs {
    pub world_id: WorldId,
    #[serde(default = "default_density")]
    pub density: f64,
    /// Defaults to the world's own seed.
    #[serde(default, deserialize_with = "seed")]
    pub seed: Option<u64>,
}

/// A parsed, typed request.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    CreateWorld(CreateWorldArgs),
    GetWorld(GetWorldArgs),
    GetStatistics(WorldArgs),
    GetRegion(RegionArgs),
    NameRegion(NameRegionArgs),
    DescribeRegion(RegionArgs),
    BatchNameRegions(BatchNameArgs),
    ListPois(WorldArgs),
    GetPoi(PoiArgs),
    CreatePoi(CreatePoiArgs),
    UpdatePoi(Box<UpdatePoiArgs>),
    DetailPoi(DetailPoiArgs),
    GenerateLore(LoreArgs),
    ListLore(ListLoreArgs),
    AddHistoricalEvent(HistoricalEventArgs),
    GetTimeline(GetTimelineArgs),
    SuggestPoiSites(SuggestSitesArgs),
    SaveWorld(WorldArgs),
    LoadWorld(WorldArgs),
    ListWorlds,
    DeleteWorld(WorldArgs),
}

impl ToolCall {
    /// Resolve a tool name and decode its arguments. `null` arguments are
    /// treated as an empty object.
    pub fn parse(tool: &str, arguments: Value) -> BridgeResult<Self> {
        let arguments = match arguments {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        let call = match tool {
            "create_world" => Self::CreateWorld(decode(arguments)?),
            "get_world" => Self::GetWorld(decode(arguments)?),
            "get_statistics" => Self::GetStatistics(decode(arguments)?),
            "get_region" => Self::GetRegion(decode(arguments)?),
            "name_region" => Self::NameRegion(decode(arguments)?),
            "describe_region" => Self::DescribeRegion(decode(arguments)?),
            "batch_name_regions" => Self::BatchNameRegions(decode(arguments)?),
            "list_pois" => Self::ListPois(decode(arguments)?),
            "get_poi" => Self::GetPoi(decode(arguments)?),
            "create_poi" => Self::CreatePoi(decode(arguments)?),
            "update_poi" => Self::UpdatePoi(Box::new(decode(arguments)?)),
            "detail_poi" => Self::DetailPoi(decode(arguments)?),
            "generate_world_lore" => Self::GenerateLore(decode(arguments)?),
            "list_lore" => Self::ListLore(decode(arguments)?),
            "add_historical_event" => Self::AddHistoricalEvent(decode(arguments)?),
            "get_timeline" => Self::GetTimeline(decode(arguments)?),
            "suggest_poi_sites" => Self::SuggestPoiSites(decode(arguments)?),
            "save_world" => Self::SaveWorld(decode(arguments)?),
            "load_world" => Self::LoadWorld(decode(arguments)?),
            "list_worlds" => Self::ListWorlds,
            "delete_world" => Self::DeleteWorld(decode(arguments)?),
            other => return Err(BridgeError::UnknownTool(other.to_string())),
        };
        Ok(call)
    }

    /// Parse the tool and arguments carried by a request.
    pub fn from_request(request: &ToolRequest) -> BridgeResult<Self> {
        Self::parse(&request.tool, request.arguments.clone())
    }
}

fn decode<T: DeserializeOwned>(arguments: Value) -> BridgeResult<T> {
    serde_json::from_value(arguments).map_err(|e| BridgeError::InvalidArguments(e.to_string()))
}

/// Numbers and numeric strings are both accepted for seeds.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

fn seed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("seed must be a non-negative integer, got \"{s}\""))),
    }
}

/// POI ids arrive either as `7` or as `"poi_7"`.
fn poi_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PoiId, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(PoiId(n)),
        NumberOrText::Text(s) => s
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid poi_id: \"{s}\""))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_world_defaults() {
        let call = ToolCall::parse("create_world", Value::Null).unwrap();
        assert_eq!(
            call,
            ToolCall::CreateWorld(CreateWorldArgs {
                width: 64,
                height: 64,
                seed: None,
                island_mode: true,
            })
        );
    }

    #[test]
    fn seed_accepts_numeric_strings() {
        let call = ToolCall::parse("create_world", json!({"seed": "42", "island_mode": false})).unwrap();
        let ToolCall::CreateWorld(args) = call else {
            panic!("expected create_world");
        };
        assert_eq!(args.seed, Some(42));
        assert!(!args.island_mode);

        let err = ToolCall::parse("create_world", json!({"seed": "forty"})).unwrap_err();
        assert_eq!(err.kind(), "invalid_arguments");
    }

    #[test]
    fn poi_id_accepts_both_forms() {
        let world = WorldId::new();
        for raw in [json!(3), json!("poi_3"), json!("3")] {
            let call = ToolCall::parse("get_poi", json!({"world_id": world, "poi_id": raw})).unwrap();
            assert_eq!(
                call,
                ToolCall::GetPoi(PoiArgs {
                    world_id: world,
                    poi_id: PoiId(3),
                })
            );
        }
    }

    #[test]
    fn update_poi_rejects_unknown_fields() {
        let world = WorldId::new();
        let ok = ToolCall::parse(
            "update_poi",
            json!({"world_id": world, "poi_id": 1, "updates": {"name": "Harrowgate", "type": "ruin"}}),
        )
        .unwrap();
        let ToolCall::UpdatePoi(args) = ok else {
            panic!("expected update_poi");
        };
        assert_eq!(args.updates.field_names(), vec!["name", "type"]);

        let err = ToolCall::parse(
            "update_poi",
            json!({"world_id": world, "poi_id": 1, "updates": {"x": 4}}),
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArguments(_)));
    }

    #[test]
    fn optional_arguments_fall_back() {
        let world = WorldId::new();
        let call = ToolCall::parse("detail_poi", json!({"world_id": world, "poi_id": "poi_1"})).unwrap();
        assert!(matches!(call, ToolCall::DetailPoi(DetailPoiArgs { detail_level: DetailLevel::Medium, .. })));

        let call = ToolCall::parse(
            "add_historical_event",
            json!({"world_id": world, "description": "The long winter"}),
        )
        .unwrap();
        let ToolCall::AddHistoricalEvent(args) = call else {
            panic!("expected add_historical_event");
        };
        assert_eq!(args.event_type, "discovery");
        assert_eq!(args.date, None);

        let call = ToolCall::parse("suggest_poi_sites", json!({"world_id": world})).unwrap();
        let ToolCall::SuggestPoiSites(args) = call else {
            panic!("expected suggest_poi_sites");
        };
        assert_eq!(args.density, DEFAULT_SITE_DENSITY);
    }

    #[test]
    fn unknown_tool_and_missing_arguments() {
        assert!(matches!(
            ToolCall::parse("summon_dragon", json!({})),
            Err(BridgeError::UnknownTool(name)) if name == "summon_dragon"
        ));
        assert!(matches!(
            ToolCall::parse("get_region", json!({"x": 1, "y": 1})),
            Err(BridgeError::InvalidArguments(_))
        ));
    }

    #[test]
    fn every_listed_tool_parses_its_name() {
        for tool in TOOL_NAMES {
            let err = ToolCall::parse(tool, json!({"world_id": 5}));
            assert!(!matches!(err, Err(BridgeError::UnknownTool(_))), "{tool}");
        }
    }

    #[test]
    fn request_accepts_params_alias() {
        let request: ToolRequest =
            serde_json::from_str(r#"{"tool": "list_worlds", "params": {"verbose": true}}"#).unwrap();
        assert_eq!(request.arguments, json!({"verbose": true}));
        assert_eq!(request.id, None);
    }

    #[test]
    fn error_response_shape() {
        let err = BridgeError::UnknownTool("fly".into());
        let response = ToolResponse::failure(Some(json!(9)), "fly", &err);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 9,
                "status": "error",
                "tool": "fly",
                "error": {"kind": "unknown_tool", "message": "unknown tool: \"fly\""}
            })
        );
    }
}
