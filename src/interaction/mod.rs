//! Interaction trigger: proximity tracking, ray picking, and highlight feedback.
pub mod components;
pub mod events;
pub mod picking;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;
