//! Dialogue module: the sequencer that shows NPC lines and the collection prompt.
pub mod events;
pub mod plugin;
pub mod reveal;
pub mod sequencer;
pub mod systems;
pub mod types;

pub use plugin::DialoguePlugin;
