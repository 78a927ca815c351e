//! Components describing the main camera's framing state.
use bevy::prelude::*;

use crate::core::config::FollowCameraSettings;

/// Look target height above the player's feet.
const LOOK_HEIGHT: f32 = 1.0;
/// Pixels of mouse motion per unit of orbit input.
const MOUSE_AXIS_SCALE: f32 = 0.1;
/// Zoom change per scroll line.
const SCROLL_STEP: f32 = 0.5;
const MIN_ZOOM_DISTANCE: f32 = 2.0;
const MAX_ZOOM_DISTANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Default,
    Dialogue,
}

/// Main camera state. Only dialogue open/close messages change `mode`.
#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    pub default_pose: Transform,
    mode: CameraMode,
    focus_point: Option<Vec3>,
}

impl CameraRig {
    /// Captures `initial` as the pose to return to after dialogue.
    pub fn new(initial: &Transform) -> Self {
        Self {
            default_pose: *initial,
            mode: CameraMode::Default,
            focus_point: None,
        }
    }

    pub fn focus_on(&mut self, point: Vec3) {
        self.mode = CameraMode::Dialogue;
        self.focus_point = Some(point);
    }

    pub fn return_to_default(&mut self) {
        self.mode = CameraMode::Default;
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn focus_point(&self) -> Option<Vec3> {
        self.focus_point
    }
}

/// Third-person follow state: preset zoom levels or a free orbit.
#[derive(Component, Debug, Clone)]
pub struct FollowRig {
    zoom_level: usize,
    zoom_distance: f32,
    horizontal_degrees: f32,
    vertical_degrees: f32,
    rotation_mode: bool,
    custom_position: bool,
}

impl Default for FollowRig {
    fn default() -> Self {
        Self {
            zoom_level: 1,
            zoom_distance: 7.0,
            horizontal_degrees: 0.0,
            vertical_degrees: 40.0,
            rotation_mode: false,
            custom_position: false,
        }
    }
}

impl FollowRig {
    pub fn new(settings: &FollowCameraSettings) -> Self {
        let mut rig = Self::default();
        rig.set_zoom_level(1, settings);
        rig
    }

    /// Selects close (0), medium (1) or far (2). A custom orbit keeps its angles.
    pub fn set_zoom_level(&mut self, level: usize, settings: &FollowCameraSettings) {
        self.zoom_level = level.min(2);
        self.zoom_distance = settings.zoom_distances[self.zoom_level];
    }

    pub fn toggle_rotation_mode(&mut self) {
        self.rotation_mode = !self.rotation_mode;
        if self.rotation_mode {
            self.custom_position = true;
        }
    }

    /// Leaves orbit mode and restores the current preset.
    pub fn reset(&mut self, settings: &FollowCameraSettings) {
        self.rotation_mode = false;
        self.custom_position = false;
        self.set_zoom_level(self.zoom_level, settings);
    }

    /// Applies right-drag mouse motion while in rotation mode.
    pub fn orbit(&mut self, mouse_delta: Vec2, delta_seconds: f32, settings: &FollowCameraSettings) {
        if !self.rotation_mode {
            return;
        }
        let step = settings.rotation_speed * delta_seconds * MOUSE_AXIS_SCALE;
        self.horizontal_degrees += mouse_delta.x * step;
        self.vertical_degrees = (self.vertical_degrees + mouse_delta.y * step)
            .clamp(settings.min_vertical_degrees, settings.max_vertical_degrees);
    }

    /// Applies scroll lines while in rotation mode.
    pub fn zoom(&mut self, scroll_lines: f32) {
        if !self.rotation_mode || scroll_lines == 0.0 {
            return;
        }
        self.zoom_distance =
            (self.zoom_distance - scroll_lines * SCROLL_STEP).clamp(MIN_ZOOM_DISTANCE, MAX_ZOOM_DISTANCE);
    }

    pub fn is_orbiting(&self) -> bool {
        self.rotation_mode || self.custom_position
    }

    pub fn in_rotation_mode(&self) -> bool {
        self.rotation_mode
    }

    pub fn zoom_distance(&self) -> f32 {
        self.zoom_distance
    }

    /// Where the camera wants to be for a player standing at `player`.
    pub fn desired_pose(&self, player: Vec3, settings: &FollowCameraSettings) -> Transform {
        let offset = if self.is_orbiting() {
            let horizontal = self.horizontal_degrees.to_radians();
            let vertical = self.vertical_degrees.to_radians();
            Vec3::new(
                horizontal.sin() * vertical.cos(),
                vertical.sin(),
                horizontal.cos() * vertical.cos(),
            ) * self.zoom_distance
        } else {
            settings.offsets[self.zoom_level]
        };
        Transform::from_translation(player + offset).looking_at(player + Vec3::Y * LOOK_HEIGHT, Vec3::Y)
    }
}
