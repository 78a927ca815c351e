//! Dialogue plugin wiring the sequencer resource and its systems.
use bevy::prelude::*;

use crate::core::{config::DialogueSettings, state::GameState};

use super::{
    events::{DialogueCompletedEvent, DialogueFocusEvent, PromptResolvedEvent, TypingBlipEvent},
    sequencer::DialogueSequencer,
    systems::{handle_dialogue_keys, publish_dialogue_signals, tick_dialogue_reveal},
};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<DialogueSettings>()
            .cloned()
            .unwrap_or_default();

        app.init_resource::<DialogueSettings>()
            .insert_resource(DialogueSequencer::new(&settings))
            .add_message::<DialogueFocusEvent>()
            .add_message::<DialogueCompletedEvent>()
            .add_message::<PromptResolvedEvent>()
            .add_message::<TypingBlipEvent>()
            .add_systems(Startup, log_dialogue_settings)
            .add_systems(
                Update,
                (
                    handle_dialogue_keys.run_if(in_state(GameState::Playing)),
                    tick_dialogue_reveal,
                    publish_dialogue_signals,
                )
                    .chain(),
            );
    }
}

fn log_dialogue_settings(settings: Res<DialogueSettings>) {
    info!(
        "DialoguePlugin initialised (typewriter: {}, {:.3}s per character)",
        settings.typewriter, settings.typing_interval
    );
}
