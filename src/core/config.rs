//! Gameplay configuration loaded from `config/game.toml`.
use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/game.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    interaction: RawInteractionSection,
    #[serde(default)]
    dialogue: RawDialogueSection,
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    follow_camera: RawFollowCameraSection,
    #[serde(default)]
    player: RawPlayerSection,
    #[serde(default)]
    progress: RawProgressSection,
    #[serde(default)]
    ui: RawUiSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractionSection {
    radius: f32,
    max_ray_distance: f32,
    interact_key: KeyCode,
}

impl Default for RawInteractionSection {
    fn default() -> Self {
        Self {
            radius: 2.0,
            max_ray_distance: 10.0,
            interact_key: KeyCode::KeyE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDialogueSection {
    typing_interval_seconds: f32,
    typewriter: bool,
    typing_sound_interval_seconds: f32,
    advance_key: KeyCode,
}

impl Default for RawDialogueSection {
    fn default() -> Self {
        Self {
            typing_interval_seconds: 0.03,
            typewriter: true,
            typing_sound_interval_seconds: 0.1,
            advance_key: KeyCode::Space,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    smooth_time_seconds: f32,
    dialogue_distance: f32,
    dialogue_height: f32,
    rotate_to_face_target: bool,
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self {
            smooth_time_seconds: 0.5,
            dialogue_distance: 4.0,
            dialogue_height: 1.5,
            rotate_to_face_target: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFollowCameraSection {
    smooth_speed: f32,
    zoom_distances: [f32; 3],
    offset_close: [f32; 3],
    offset_medium: [f32; 3],
    offset_far: [f32; 3],
    rotation_speed: f32,
    min_vertical_degrees: f32,
    max_vertical_degrees: f32,
    rotation_mode_key: KeyCode,
    reset_key: KeyCode,
}

impl Default for RawFollowCameraSection {
    fn default() -> Self {
        Self {
            smooth_speed: 5.0,
            zoom_distances: [3.0, 7.0, 12.0],
            offset_close: [0.0, 2.0, 3.0],
            offset_medium: [0.0, 5.0, 7.0],
            offset_far: [0.0, 10.0, 12.0],
            rotation_speed: 100.0,
            min_vertical_degrees: 10.0,
            max_vertical_degrees: 80.0,
            rotation_mode_key: KeyCode::ShiftLeft,
            reset_key: KeyCode::KeyR,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    move_speed: f32,
    turn_speed: f32,
    gravity: f32,
    stopping_distance: f32,
    click_to_move: bool,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: 8.0,
            gravity: -9.81,
            stopping_distance: 0.2,
            click_to_move: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawProgressSection {
    total_animals_required: usize,
    save_key: String,
    save_path: String,
}

impl Default for RawProgressSection {
    fn default() -> Self {
        Self {
            total_animals_required: 9,
            save_key: "PetTownSaveData".into(),
            save_path: "saves/player_prefs.json".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawUiSection {
    end_screen_delay_seconds: f32,
    counter_pop_seconds: f32,
}

impl Default for RawUiSection {
    fn default() -> Self {
        Self {
            end_screen_delay_seconds: 1.0,
            counter_pop_seconds: 0.5,
        }
    }
}

/// Proximity and picking parameters for interactable entities.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub default_radius: f32,
    pub max_ray_distance: f32,
    pub interact_key: KeyCode,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionSection::default().into()
    }
}

impl From<RawInteractionSection> for InteractionSettings {
    fn from(value: RawInteractionSection) -> Self {
        Self {
            default_radius: value.radius.max(0.0),
            max_ray_distance: value.max_ray_distance.max(0.0),
            interact_key: value.interact_key,
        }
    }
}

/// Reveal timing and input for the dialogue sequencer.
#[derive(Resource, Debug, Clone)]
pub struct DialogueSettings {
    pub typing_interval: f32,
    pub typewriter: bool,
    pub typing_sound_interval: f32,
    pub advance_key: KeyCode,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        RawDialogueSection::default().into()
    }
}

impl From<RawDialogueSection> for DialogueSettings {
    fn from(value: RawDialogueSection) -> Self {
        Self {
            typing_interval: value.typing_interval_seconds.max(0.0),
            typewriter: value.typewriter,
            typing_sound_interval: value.typing_sound_interval_seconds.max(0.0),
            advance_key: value.advance_key,
        }
    }
}

/// Dialogue framing parameters for the main camera.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub smooth_time: f32,
    pub dialogue_distance: f32,
    pub dialogue_height: f32,
    pub rotate_to_face_target: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        RawCameraSection::default().into()
    }
}

impl From<RawCameraSection> for CameraSettings {
    fn from(value: RawCameraSection) -> Self {
        Self {
            smooth_time: value.smooth_time_seconds.max(0.01),
            dialogue_distance: value.dialogue_distance,
            dialogue_height: value.dialogue_height,
            rotate_to_face_target: value.rotate_to_face_target,
        }
    }
}

/// Player-following camera rig parameters.
#[derive(Resource, Debug, Clone)]
pub struct FollowCameraSettings {
    pub smooth_speed: f32,
    pub zoom_distances: [f32; 3],
    pub offsets: [Vec3; 3],
    pub rotation_speed: f32,
    pub min_vertical_degrees: f32,
    pub max_vertical_degrees: f32,
    pub rotation_mode_key: KeyCode,
    pub reset_key: KeyCode,
}

impl Default for FollowCameraSettings {
    fn default() -> Self {
        RawFollowCameraSection::default().into()
    }
}

impl From<RawFollowCameraSection> for FollowCameraSettings {
    fn from(value: RawFollowCameraSection) -> Self {
        let min_vertical = value.min_vertical_degrees.clamp(-89.0, 89.0);
        let max_vertical = value.max_vertical_degrees.clamp(min_vertical, 89.0);
        Self {
            smooth_speed: value.smooth_speed.max(0.0),
            zoom_distances: value.zoom_distances.map(|d| d.clamp(2.0, 20.0)),
            offsets: [
                Vec3::from_array(value.offset_close),
                Vec3::from_array(value.offset_medium),
                Vec3::from_array(value.offset_far),
            ],
            rotation_speed: value.rotation_speed,
            min_vertical_degrees: min_vertical,
            max_vertical_degrees: max_vertical,
            rotation_mode_key: value.rotation_mode_key,
            reset_key: value.reset_key,
        }
    }
}

/// Locomotion tuning for the player avatar.
#[derive(Resource, Debug, Clone)]
pub struct PlayerSettings {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub gravity: f32,
    pub stopping_distance: f32,
    pub click_to_move: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        RawPlayerSection::default().into()
    }
}

impl From<RawPlayerSection> for PlayerSettings {
    fn from(value: RawPlayerSection) -> Self {
        Self {
            move_speed: value.move_speed.max(0.0),
            turn_speed: value.turn_speed.max(0.0),
            gravity: value.gravity.min(0.0),
            stopping_distance: value.stopping_distance.max(0.01),
            click_to_move: value.click_to_move,
        }
    }
}

/// Where and how collection progress is persisted.
#[derive(Resource, Debug, Clone)]
pub struct ProgressSettings {
    pub total_required: usize,
    pub save_key: String,
    pub save_path: PathBuf,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        RawProgressSection::default().into()
    }
}

impl From<RawProgressSection> for ProgressSettings {
    fn from(value: RawProgressSection) -> Self {
        let save_key = if value.save_key.trim().is_empty() {
            RawProgressSection::default().save_key
        } else {
            value.save_key.trim().to_string()
        };
        Self {
            total_required: value.total_animals_required.max(1),
            save_key,
            save_path: PathBuf::from(value.save_path),
        }
    }
}

/// Timings for HUD and menu screens.
#[derive(Resource, Debug, Clone)]
pub struct UiSettings {
    pub end_screen_delay: f32,
    pub counter_pop: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        RawUiSection::default().into()
    }
}

impl From<RawUiSection> for UiSettings {
    fn from(value: RawUiSection) -> Self {
        Self {
            end_screen_delay: value.end_screen_delay_seconds.max(0.0),
            counter_pop: value.counter_pop_seconds.max(0.01),
        }
    }
}

/// All gameplay settings, split into per-module resources by `CorePlugin`.
#[derive(Debug, Clone, Default)]
pub struct GameSettings {
    pub interaction: InteractionSettings,
    pub dialogue: DialogueSettings,
    pub camera: CameraSettings,
    pub follow_camera: FollowCameraSettings,
    pub player: PlayerSettings,
    pub progress: ProgressSettings,
    pub ui: UiSettings,
}

impl GameSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawGameConfig>(data).map(Into::into)
    }
}

impl From<RawGameConfig> for GameSettings {
    fn from(value: RawGameConfig) -> Self {
        Self {
            interaction: value.interaction.into(),
            dialogue: value.dialogue.into(),
            camera: value.camera.into(),
            follow_camera: value.follow_camera.into(),
            player: value.player.into(),
            progress: value.progress.into(),
            ui: value.ui.into(),
        }
    }
}
