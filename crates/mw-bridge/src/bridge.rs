use std::io::{self, BufRead, Write};
use std::sync::Arc;

use mw_core::{EventSink, PersistError, WorldEvent, WorldId, WorldRepository, WorldStore};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{BridgeError, BridgeResult};
use crate::protocol::{ToolCall, ToolRequest, ToolResponse, UpdatePoiArgs};

/// Translates tool requests into [`WorldStore`] calls.
///
/// Every request maps to one store operation. A successful mutation
/// publishes exactly one [`WorldEvent`]; queries and failures publish
/// nothing.
pub struct CommandBridge {
    store: Arc<WorldStore>,
    events: Arc<dyn EventSink>,
    repository: Option<Arc<dyn WorldRepository>>,
}

impl CommandBridge {
    pub fn new(store: Arc<WorldStore>, events: Arc<dyn EventSink>) -> Self {
        Self {
            store,
            events,
            repository: None,
        }
    }

    /// Enable `save_world`, `load_world` and saved-world listing.
    pub fn with_repository(mut self, repository: Arc<dyn WorldRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn store(&self) -> &Arc<WorldStore> {
        &self.store
    }

    /// Handle one request. Never fails; errors become error responses.
    pub fn handle(&self, request: ToolRequest) -> ToolResponse {
        let ToolRequest { id, tool, arguments } = request;
        tracing::debug!(tool = %tool, "dispatching");

        match ToolCall::parse(&tool, arguments).and_then(|call| self.dispatch(call)) {
            Ok(result) => ToolResponse::success(id, tool, result),
            Err(err) => {
                tracing::debug!(tool = %tool, kind = err.kind(), "tool failed: {err}");
                ToolResponse::failure(id, tool, &err)
            }
        }
    }

    /// Handle one raw request line. Blank lines produce no response.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => self.handle(request),
            Err(err) => {
                tracing::warn!(error = %err, "malformed request line");
                ToolResponse::failure(None, "", &BridgeError::MalformedRequest(err.to_string()))
            }
        };
        Some(encode_response(&response))
    }

    /// Serve JSON-lines requests from `reader` until end of input, writing
    /// one response line per request.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.lines() {
            if let Some(response) = self.handle_line(&line?) {
                writeln!(writer, "{response}")?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    /// Async counterpart of [`CommandBridge::run`].
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line) {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }

    /// Execute a parsed call and return its JSON result.
    pub fn dispatch(&self, call: ToolCall) -> BridgeResult<Value> {
        let store = &self.store;
        match call {
            ToolCall::CreateWorld(args) => {
                let seed = args.seed.unwrap_or_else(rand::random);
                let world = store.create(args.width, args.height, seed, args.island_mode)?;
                self.emit(WorldEvent::WorldCreated {
                    world_id: world.id,
                    width: world.width,
                    height: world.height,
                    seed,
                    island: args.island_mode,
                });
                to_json(world.summary())
            }
            ToolCall::GetWorld(args) => {
                if args.include_terrain {
                    to_json(store.get_world(args.world_id)?)
                } else {
                    to_json(store.summary(args.world_id)?)
                }
            }
            ToolCall::GetStatistics(args) => to_json(store.statistics(args.world_id)?),
            ToolCall::GetRegion(args) => to_json(store.get_region(args.world_id, args.x, args.y)?),
            ToolCall::NameRegion(args) => {
                let region = store.name_region(args.world_id, args.x, args.y, &args.name)?;
                self.emit(WorldEvent::RegionNamed {
                    world_id: args.world_id,
                    x: region.x,
                    y: region.y,
                    name: args.name,
                });
                to_json(region)
            }
            ToolCall::DescribeRegion(args) => {
                let description = store.describe_region(args.world_id, args.x, args.y)?;
                let (x, y) = accepted_cell(args.x, args.y);
                self.emit(WorldEvent::RegionDescribed {
                    world_id: args.world_id,
                    x,
                    y,
                });
                Ok(json!({"x": x, "y": y, "description": description}))
            }
            ToolCall::BatchNameRegions(args) => {
                let named = store.batch_name_regions(args.world_id, &args.regions)?;
                if !named.is_empty() {
                    self.emit(WorldEvent::RegionsNamed {
                        world_id: args.world_id,
                        regions: named.iter().map(|r| (r.x, r.y)).collect(),
                    });
                }
                Ok(json!({"named": named.len(), "regions": named}))
            }
            ToolCall::ListPois(args) => to_json(store.list_pois(args.world_id)?),
            ToolCall::GetPoi(args) => to_json(store.get_poi(args.world_id, args.poi_id)?),
            ToolCall::CreatePoi(args) => {
                let poi = store.create_poi(args.world_id, &args.poi_type, args.x, args.y, args.name)?;
                self.emit(WorldEvent::PoiCreated {
                    world_id: args.world_id,
                    poi_id: poi.id,
                    poi_type: poi.poi_type.clone(),
                    x: poi.x,
                    y: poi.y,
                    name: poi.name.clone(),
                });
                to_json(poi)
            }
            ToolCall::UpdatePoi(args) => {
                let UpdatePoiArgs {
                    world_id,
                    poi_id,
                    updates,
                } = *args;
                let fields = updates.field_names().into_iter().map(String::from).collect();
                let poi = store.update_poi(world_id, poi_id, updates)?;
                self.emit(WorldEvent::PoiUpdated {
                    world_id,
                    poi_id: poi.id,
                    fields,
                });
                to_json(poi)
            }
            ToolCall::DetailPoi(args) => {
                let poi = store.detail_poi(args.world_id, args.poi_id, args.detail_level)?;
                self.emit(WorldEvent::PoiDetailed {
                    world_id: args.world_id,
                    poi_id: poi.id,
                    level: args.detail_level,
                });
                to_json(poi)
            }
            ToolCall::GenerateLore(args) => {
                let entry = store.add_lore(args.world_id, &args.lore_type, args.themes)?;
                self.emit(WorldEvent::LoreCreated {
                    world_id: args.world_id,
                    lore_id: entry.id,
                    lore_type: entry.lore_type.clone(),
                    title: entry.title.clone(),
                });
                to_json(entry)
            }
            ToolCall::ListLore(args) => {
                to_json(store.list_lore(args.world_id, args.lore_type.as_deref())?)
            }
            ToolCall::AddHistoricalEvent(args) => {
                let event = store.add_timeline_event(
                    args.world_id,
                    &args.event_type,
                    &args.description,
                    args.date,
                )?;
                self.emit(WorldEvent::HistoricalEventAdded {
                    world_id: args.world_id,
                    event_id: event.id,
                    event_type: event.event_type.clone(),
                    date: event.date.clone(),
                });
                to_json(event)
            }
            ToolCall::GetTimeline(args) => {
                to_json(store.timeline(args.world_id, args.event_type.as_deref())?)
            }
            ToolCall::SuggestPoiSites(args) => {
                let seed = match args.seed {
                    Some(seed) => seed,
                    None => store.with_world(args.world_id, |w| w.seed)?,
                };
                to_json(store.suggest_poi_sites(args.world_id, args.density, seed)?)
            }
            ToolCall::SaveWorld(args) => {
                let repository = self.repository()?;
                let world = store.get_world(args.world_id)?;
                repository.save_world(&world)?;
                self.emit(WorldEvent::WorldSaved {
                    world_id: args.world_id,
                });
                Ok(json!({"world_id": args.world_id, "saved": true}))
            }
            ToolCall::LoadWorld(args) => {
                let repository = self.repository()?;
                let world = repository.load_world(args.world_id)?;
                let id = store.restore(world)?;
                self.emit(WorldEvent::WorldLoaded { world_id: id });
                to_json(store.summary(id)?)
            }
            ToolCall::ListWorlds => {
                let saved = match &self.repository {
                    Some(repository) => repository.list_world_ids()?,
                    None => Vec::new(),
                };
                Ok(json!({"live": store.world_ids(), "saved": saved}))
            }
            ToolCall::DeleteWorld(args) => {
                self.delete_world(args.world_id)?;
                self.emit(WorldEvent::WorldDeleted {
                    world_id: args.world_id,
                });
                Ok(json!({"world_id": args.world_id, "deleted": true}))
            }
        }
    }

    /// Remove the live world and its saved snapshot. Fails only when
    /// neither exists.
    fn delete_world(&self, id: WorldId) -> BridgeResult<()> {
        let live = self.store.delete(id);
        let saved = match &self.repository {
            Some(repository) => match repository.delete_world(id) {
                Ok(()) => true,
                Err(PersistError::NotFound(_)) => false,
                Err(err) => return Err(err.into()),
            },
            None => false,
        };
        match live {
            Ok(()) => Ok(()),
            Err(_) if saved => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn repository(&self) -> BridgeResult<&Arc<dyn WorldRepository>> {
        self.repository.as_ref().ok_or(BridgeError::NoRepository)
    }

    fn emit(&self, event: WorldEvent) {
        self.events.publish(event);
    }
}

/// Coordinates the store has already accepted are in bounds, so never negative.
fn accepted_cell(x: i64, y: i64) -> (usize, usize) {
    (usize::try_from(x).unwrap_or_default(), usize::try_from(y).unwrap_or_default())
}

fn to_json<T: Serialize>(value: T) -> BridgeResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn encode_response(response: &ToolResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        json!({
            "id": response.id,
            "status": "error",
            "tool": response.tool,
            "error": {"kind": "serialization", "message": err.to_string()},
        })
        .to_string()
    })
}
