//! Player plugin wiring spawning and movement.
use bevy::prelude::*;

use crate::{
    core::{
        config::PlayerSettings,
        state::{GameState, LevelSpawnSet},
    },
    player::systems::{move_player, spawn_player, steer_player},
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerSettings>()
            .add_systems(OnEnter(GameState::Playing), spawn_player.in_set(LevelSpawnSet))
            .add_systems(
                Update,
                (steer_player, move_player)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
