//! NPC plugin wiring interaction handling, dialogue continuations and town spawning.
use bevy::prelude::*;

use crate::{
    core::state::{GameState, LevelSpawnSet},
    dialogue::systems::publish_dialogue_signals,
    interaction::systems::detect_interaction_input,
    npc::{
        components::DialogueRng,
        spawning::spawn_town_npcs,
        systems::{
            advance_facing_turns, deactivate_already_collected, handle_dialogue_completions,
            handle_interact_requests, handle_prompt_responses,
        },
    },
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueRng>()
            .add_systems(
                OnEnter(GameState::Playing),
                spawn_town_npcs.in_set(LevelSpawnSet),
            )
            .add_systems(
                Update,
                (
                    deactivate_already_collected,
                    handle_interact_requests
                        .after(detect_interaction_input)
                        .before(publish_dialogue_signals)
                        .run_if(in_state(GameState::Playing)),
                    (handle_dialogue_completions, handle_prompt_responses)
                        .chain()
                        .after(publish_dialogue_signals),
                    advance_facing_turns,
                ),
            );
    }
}
