//! Collection progress: which animals were found and the two story milestones.
pub mod errors;
pub mod plugin;
pub mod state;
pub mod store;

pub use plugin::ProgressPlugin;
