use mw_terrain::Biome;

use crate::poi::Npc;
use crate::world::World;

/// Source of generated text for names, descriptions, NPCs and lore.
///
/// Implementations may be random, but carry no world state of their own;
/// the store calls them while holding the target world's write lock.
pub trait Prose: Send + Sync {
    /// A name for a new point of interest of the given type.
    fn name_for(&self, poi_type: &str) -> String;

    /// A description for a point of interest.
    fn description_for(&self, poi_type: &str, name: &str) -> String;

    /// A fresh NPC suited to the point of interest type.
    fn npc_for(&self, poi_type: &str) -> Npc;

    fn rumor_for(&self, poi_type: &str, name: &str) -> String;

    fn secret_for(&self, poi_type: &str) -> String;

    fn lore_title(&self, lore_type: &str) -> String;

    /// Lore text, free to draw on the world's terrain and contents.
    fn lore_body(&self, lore_type: &str, themes: &[String], world: &World) -> String;

    /// Biome-flavored prose for a region.
    fn region_description(&self, biome: Biome, region_name: &str) -> String;

    /// A date for a timeline event that was given none.
    fn event_date(&self) -> String;
}
