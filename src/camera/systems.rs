//! Systems moving the main camera between its follow view and dialogue framing.
use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

use crate::{
    core::config::{CameraSettings, FollowCameraSettings},
    dialogue::events::DialogueFocusEvent,
    player::components::Player,
};

use super::{
    components::{CameraMode, CameraRig, FollowRig},
    framing::{approach, framing_pose, smoothing_factor},
};

/// Pixel-based wheels report much larger deltas than line-based ones.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Switches the rig into or out of dialogue framing.
pub fn apply_dialogue_focus(
    mut focus_events: MessageReader<DialogueFocusEvent>,
    mut rigs: Query<&mut CameraRig>,
) {
    let Some(latest) = focus_events.read().last().copied() else {
        return;
    };
    for mut rig in rigs.iter_mut() {
        match latest.focus {
            Some(point) => rig.focus_on(point),
            None => rig.return_to_default(),
        }
    }
}

/// Zoom presets, rotation-mode toggle, reset, right-drag orbit and scroll zoom.
#[allow(clippy::too_many_arguments)]
pub fn handle_follow_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    settings: Res<FollowCameraSettings>,
    mut rigs: Query<&mut FollowRig>,
) {
    let mouse_delta: Vec2 = motion.read().map(|event| event.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_SCROLL_LINE,
        })
        .sum();

    for mut rig in rigs.iter_mut() {
        if keyboard.just_pressed(settings.rotation_mode_key) {
            rig.toggle_rotation_mode();
            debug!(target: "camera", "Rotation mode: {}", rig.in_rotation_mode());
        }
        if keyboard.just_pressed(settings.reset_key) {
            rig.reset(&settings);
        }

        let presets = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
        if let Some(level) = presets.iter().position(|key| keyboard.just_pressed(*key)) {
            rig.set_zoom_level(level, &settings);
        }

        if mouse.pressed(MouseButton::Right) {
            rig.orbit(mouse_delta, time.delta_secs(), &settings);
        }
        rig.zoom(scroll);
    }
}

/// Keeps the default pose glued to the player while a follow rig is attached.
pub fn update_follow_pose(
    settings: Res<FollowCameraSettings>,
    player: Query<&Transform, With<Player>>,
    mut rigs: Query<(&FollowRig, &mut CameraRig)>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    for (follow, mut rig) in rigs.iter_mut() {
        rig.default_pose = follow.desired_pose(player_transform.translation, &settings);
    }
}

/// Eases the camera toward the dialogue framing or back to the default pose.
#[allow(clippy::type_complexity)]
pub fn move_camera(
    time: Res<Time>,
    settings: Res<CameraSettings>,
    follow_settings: Res<FollowCameraSettings>,
    player: Query<&Transform, (With<Player>, Without<CameraRig>)>,
    mut cameras: Query<(&mut Transform, &CameraRig, Has<FollowRig>)>,
) {
    let delta = time.delta_secs();
    for (mut transform, rig, follows) in cameras.iter_mut() {
        let (target, rate) = match (rig.mode(), rig.focus_point()) {
            (CameraMode::Dialogue, Some(focus)) => {
                let Ok(player_transform) = player.single() else {
                    continue;
                };
                let pose = framing_pose(
                    player_transform.translation,
                    focus,
                    transform.rotation,
                    &settings,
                );
                (pose, settings.smooth_time.recip())
            }
            _ if follows => (rig.default_pose, follow_settings.smooth_speed),
            _ => (rig.default_pose, settings.smooth_time.recip()),
        };

        if transform.translation == target.translation && transform.rotation == target.rotation {
            continue;
        }
        approach(&mut transform, &target, smoothing_factor(delta, rate));
    }
}
