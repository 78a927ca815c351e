//! CorePlugin loads configuration, registers game states and startup logging.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;

#[cfg(feature = "core_debug")]
use crate::{dialogue::sequencer::DialogueSequencer, progress::state::ProgressStore};

use super::{
    config::{
        CameraSettings, DialogueSettings, FollowCameraSettings, GameSettings, InteractionSettings,
        PlayerSettings, ProgressSettings, UiSettings,
    },
    state::{configure_level_spawning, GameState},
};

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Inserts every settings resource and the [`GameState`] machine.
///
/// Must be added before the gameplay plugins, which read their settings
/// while building.
#[derive(Debug, Clone)]
pub struct CorePlugin {
    settings: GameSettings,
}

impl CorePlugin {
    /// Creates a CorePlugin with already-loaded settings.
    pub fn with_settings(settings: GameSettings) -> Self {
        Self { settings }
    }
}

impl Default for CorePlugin {
    /// Reads `config/game.toml`, falling back to defaults.
    fn default() -> Self {
        Self::with_settings(GameSettings::load_or_default())
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone();
        app.insert_resource(settings.interaction)
            .insert_resource(settings.dialogue)
            .insert_resource(settings.camera)
            .insert_resource(settings.follow_camera)
            .insert_resource(settings.player)
            .insert_resource(settings.progress)
            .insert_resource(settings.ui)
            .init_state::<GameState>()
            .add_systems(Startup, log_loaded_settings);
        configure_level_spawning(app);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_game_ticks);
        }
    }
}

fn log_loaded_settings(
    interaction: Res<InteractionSettings>,
    dialogue: Res<DialogueSettings>,
    player: Res<PlayerSettings>,
    progress: Res<ProgressSettings>,
) {
    info!(
        "CorePlugin initialised (interact radius: {:.1}, typing interval: {:.3}s, move speed: {:.1}, animals required: {}, save: {})",
        interaction.default_radius,
        dialogue.typing_interval,
        player.move_speed,
        progress.total_required,
        progress.save_path.display()
    );
}

#[cfg(feature = "core_debug")]
fn log_game_ticks(
    time: Res<Time>,
    mut timer: ResMut<DebugTickTimer>,
    state: Res<State<GameState>>,
    sequencer: Option<Res<DialogueSequencer>>,
    progress: Option<Res<ProgressStore>>,
) {
    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }
    let phase = sequencer
        .map(|sequencer| format!("{:?}", sequencer.phase()))
        .unwrap_or_else(|| "none".to_string());
    let found = progress
        .map(|progress| format!("{}/{}", progress.collected_count(), progress.total_required()))
        .unwrap_or_else(|| "-".to_string());
    info!(
        target: "core_debug",
        "State: {:?} | dialogue: {} | animals: {}",
        state.get(),
        phase,
        found
    );
}
