//! Core module hosting configuration, game states, and startup logging.
pub mod config;
pub mod plugin;
pub mod state;

pub use plugin::CorePlugin;
