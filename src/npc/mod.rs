//! NPC module: chatter NPCs, collectible animals and the volunteer chief.
pub mod components;
pub mod plugin;
pub mod spawning;
pub mod systems;

pub use plugin::NpcPlugin;
