//! WorldPlugin sets up the persistent camera and the rebuildable level scenery.
use bevy::prelude::*;

use crate::{
    core::{
        config::FollowCameraSettings,
        state::{GameState, LevelSpawnSet},
    },
    world::systems::{spawn_main_camera, spawn_world_environment},
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FollowCameraSettings>()
            .add_systems(Startup, spawn_main_camera)
            .add_systems(
                OnEnter(GameState::Playing),
                spawn_world_environment.in_set(LevelSpawnSet),
            );
    }
}
