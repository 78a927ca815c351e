//! World module housing the camera entity and level scenery.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
