//! Camera module: dialogue framing on top of a player-following rig.
pub mod components;
pub mod framing;
pub mod plugin;
pub mod systems;

pub use plugin::CameraPlugin;
