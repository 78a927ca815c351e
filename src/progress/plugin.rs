//! Progress plugin restoring saved collection state at startup.
use bevy::prelude::*;

use crate::core::config::ProgressSettings;

use super::{
    state::ProgressStore,
    store::{JsonFileStore, KeyValueStore},
};

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<ProgressSettings>()
            .cloned()
            .unwrap_or_default();

        let backend: Box<dyn KeyValueStore> = match JsonFileStore::open(&settings.save_path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(
                    target: "progress",
                    "Could not open save file ({}). Progress will start empty.",
                    err
                );
                Box::new(JsonFileStore::empty(&settings.save_path))
            }
        };

        app.insert_resource(ProgressStore::load(
            backend,
            settings.save_key.clone(),
            settings.total_required,
        ))
        .add_systems(Startup, log_loaded_progress);
    }
}

fn log_loaded_progress(progress: Res<ProgressStore>) {
    info!(
        "ProgressPlugin loaded {}/{} animals (met chief: {}, completed: {})",
        progress.collected_count(),
        progress.total_required(),
        progress.has_met_volunteer_chief(),
        progress.is_game_completed()
    );
}
