//! Pure pose math for dialogue framing and smoothing.
use bevy::prelude::*;

use crate::core::config::CameraSettings;

/// Pose that frames the player and the dialogue focus point together.
///
/// The camera sits past the midpoint along the player-to-focus direction at
/// `dialogue_height` above it. Without `rotate_to_face_target` the current
/// rotation is kept.
pub fn framing_pose(player: Vec3, focus: Vec3, current_rotation: Quat, settings: &CameraSettings) -> Transform {
    let midpoint = (player + focus) * 0.5;
    let mut offset = (focus - player).normalize_or_zero() * settings.dialogue_distance;
    offset.y = settings.dialogue_height;

    let pose = Transform::from_translation(midpoint + offset);
    if settings.rotate_to_face_target && offset != Vec3::ZERO {
        pose.looking_at(midpoint, Vec3::Y)
    } else {
        pose.with_rotation(current_rotation)
    }
}

/// Interpolation factor for one tick, clamped so a long frame never overshoots.
pub fn smoothing_factor(delta_seconds: f32, rate: f32) -> f32 {
    (delta_seconds * rate).clamp(0.0, 1.0)
}

/// Moves `current` a `factor` of the way toward `target`.
pub fn approach(current: &mut Transform, target: &Transform, factor: f32) {
    current.translation = current.translation.lerp(target.translation, factor);
    current.rotation = current.rotation.slerp(target.rotation, factor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_sits_between_player_and_focus() {
        let settings = CameraSettings::default();
        let pose = framing_pose(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Quat::IDENTITY, &settings);

        assert!(pose.translation.distance(Vec3::new(2.0 + settings.dialogue_distance, settings.dialogue_height, 0.0)) < 1e-5);
        let to_midpoint = (Vec3::new(2.0, 0.0, 0.0) - pose.translation).normalize();
        assert!(pose.forward().as_vec3().distance(to_midpoint) < 1e-4);
    }

    #[test]
    fn framing_keeps_rotation_when_not_facing_target() {
        let settings = CameraSettings {
            rotate_to_face_target: false,
            ..default()
        };
        let rotation = Quat::from_rotation_y(0.7);
        let pose = framing_pose(Vec3::ZERO, Vec3::Z, rotation, &settings);
        assert_eq!(pose.rotation, rotation);
    }

    #[test]
    fn approach_moves_partially_and_never_overshoots() {
        let mut current = Transform::from_xyz(0.0, 0.0, 0.0);
        let target = Transform::from_xyz(10.0, 0.0, 0.0);

        approach(&mut current, &target, smoothing_factor(0.1, 2.0));
        assert!((current.translation.x - 2.0).abs() < 1e-5);

        approach(&mut current, &target, smoothing_factor(5.0, 2.0));
        assert_eq!(current.translation, target.translation);
    }
}
