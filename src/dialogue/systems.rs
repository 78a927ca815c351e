//! Systems driving the dialogue sequencer each frame.
use bevy::prelude::*;

use crate::core::config::DialogueSettings;

use super::{
    events::{DialogueCompletedEvent, DialogueFocusEvent, PromptResolvedEvent, TypingBlipEvent},
    sequencer::DialogueSequencer,
    types::DialogueSignal,
};

/// Advance key closes or fast-forwards the open session; Y/N answer the prompt.
pub fn handle_dialogue_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<DialogueSettings>,
    mut sequencer: ResMut<DialogueSequencer>,
) {
    if sequencer.is_prompt_open() {
        if keyboard.just_pressed(KeyCode::KeyY) {
            sequencer.respond(true);
        } else if keyboard.just_pressed(KeyCode::KeyN) {
            sequencer.respond(false);
        }
    }

    if sequencer.is_active() && keyboard.just_pressed(settings.advance_key) {
        sequencer.advance();
    }
}

/// Steps the typewriter reveal by the frame delta.
pub fn tick_dialogue_reveal(time: Res<Time>, mut sequencer: ResMut<DialogueSequencer>) {
    sequencer.tick(time.delta_secs());
}

/// Turns buffered sequencer signals into messages, preserving their order.
pub fn publish_dialogue_signals(
    mut sequencer: ResMut<DialogueSequencer>,
    mut focus: MessageWriter<DialogueFocusEvent>,
    mut completed: MessageWriter<DialogueCompletedEvent>,
    mut resolved: MessageWriter<PromptResolvedEvent>,
    mut blips: MessageWriter<TypingBlipEvent>,
) {
    // Read-only access keeps change detection quiet on idle frames.
    if !sequencer.bypass_change_detection().has_pending_signals() {
        return;
    }

    for signal in sequencer.drain_signals() {
        match signal {
            DialogueSignal::Opened { focus: point } => {
                focus.write(DialogueFocusEvent { focus: Some(point) });
            }
            DialogueSignal::Closed => {
                focus.write(DialogueFocusEvent { focus: None });
            }
            DialogueSignal::Completed { callback, forced } => {
                completed.write(DialogueCompletedEvent { callback, forced });
            }
            DialogueSignal::PromptResolved {
                callback,
                accepted,
                forced,
            } => {
                resolved.write(PromptResolvedEvent {
                    callback,
                    accepted,
                    forced,
                });
            }
            DialogueSignal::TypingBlip => {
                blips.write(TypingBlipEvent);
            }
        }
    }
}
