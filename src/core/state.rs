//! Top-level screens the game moves between.
use bevy::prelude::*;

/// Which screen currently owns input.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    EndScreen,
}

/// Marker for entities that belong to the explorable level and are rebuilt on restart.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

/// Systems that build the level when gameplay starts. Skipped while a level already exists.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelSpawnSet;

/// Run condition for [`LevelSpawnSet`].
pub fn level_missing(level: Query<(), With<LevelEntity>>) -> bool {
    level.is_empty()
}

/// Gates [`LevelSpawnSet`] on entering [`GameState::Playing`] without an existing level.
pub fn configure_level_spawning(app: &mut App) {
    app.configure_sets(
        OnEnter(GameState::Playing),
        LevelSpawnSet.run_if(level_missing),
    );
}
