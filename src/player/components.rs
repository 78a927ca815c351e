//! Player marker and locomotion state.
use bevy::prelude::*;

use crate::core::config::PlayerSettings;

/// Downward speed applied while standing so the player stays glued to the ground.
const GROUNDED_VELOCITY: f32 = -0.5;
const GROUND_HEIGHT: f32 = 0.0;

/// Marker component identifying the player root (feet at the transform origin).
#[derive(Component, Debug, Default)]
pub struct Player;

/// Yaw rotation whose forward (-Z) points along `direction` projected on the ground.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-6 {
        return None;
    }
    Some(Quat::from_rotation_y((-flat.x).atan2(-flat.z)))
}

/// Keyboard steering or click destination plus vertical velocity.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerMotion {
    direction: Vec3,
    destination: Option<Vec3>,
    vertical_velocity: f32,
}

impl PlayerMotion {
    /// Applies this frame's input. Keyboard steering cancels any click destination.
    pub fn plan(
        &mut self,
        steering: Vec3,
        clicked: Option<Vec3>,
        position: Vec3,
        stopping_distance: f32,
    ) {
        let steering = Vec3::new(steering.x, 0.0, steering.z);
        if steering.length_squared() > 0.0 {
            self.direction = steering.normalize();
            self.destination = None;
            return;
        }

        if let Some(point) = clicked {
            self.destination = Some(point);
        }

        let Some(destination) = self.destination else {
            self.direction = Vec3::ZERO;
            return;
        };
        let mut to_target = destination - position;
        to_target.y = 0.0;
        if to_target.length() <= stopping_distance {
            self.destination = None;
            self.direction = Vec3::ZERO;
        } else {
            self.direction = to_target.normalize();
        }
    }

    /// Turns toward the planned direction, moves, and applies gravity.
    pub fn step(&mut self, transform: &mut Transform, settings: &PlayerSettings, delta_seconds: f32) {
        let grounded = transform.translation.y <= GROUND_HEIGHT;
        self.vertical_velocity = if grounded {
            GROUNDED_VELOCITY
        } else {
            self.vertical_velocity + settings.gravity * delta_seconds
        };

        if let Some(target) = facing_rotation(self.direction) {
            let t = (settings.turn_speed * delta_seconds).clamp(0.0, 1.0);
            transform.rotation = transform.rotation.slerp(target, t);
        }

        let mut motion = self.direction * settings.move_speed;
        motion.y = self.vertical_velocity;
        transform.translation += motion * delta_seconds;
        if transform.translation.y < GROUND_HEIGHT {
            transform.translation.y = GROUND_HEIGHT;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.direction != Vec3::ZERO
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}
