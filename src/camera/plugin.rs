//! Camera plugin wiring follow controls and dialogue framing.
use bevy::prelude::*;

use crate::{
    camera::systems::{apply_dialogue_focus, handle_follow_input, move_camera, update_follow_pose},
    core::{
        config::{CameraSettings, FollowCameraSettings},
        state::GameState,
    },
    dialogue::systems::publish_dialogue_signals,
    player::systems::move_player,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<FollowCameraSettings>()
            .add_systems(Startup, log_camera_settings)
            .add_systems(
                Update,
                (
                    apply_dialogue_focus.after(publish_dialogue_signals),
                    handle_follow_input.run_if(in_state(GameState::Playing)),
                    update_follow_pose
                        .after(move_player)
                        .after(handle_follow_input),
                    move_camera
                        .after(apply_dialogue_focus)
                        .after(handle_follow_input)
                        .after(update_follow_pose),
                ),
            );
    }
}

fn log_camera_settings(settings: Res<CameraSettings>) {
    info!(
        "CameraPlugin initialised (smooth time {:.2}s, dialogue distance {:.1})",
        settings.smooth_time, settings.dialogue_distance
    );
}
