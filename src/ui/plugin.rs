// src/ui/plugin.rs
//
// UiPlugin coordinates the dialogue panels, HUD, main menu and end screen.

use bevy::prelude::*;

use crate::{
    core::{config::UiSettings, state::GameState},
    dialogue::{sequencer::DialogueSequencer, systems::publish_dialogue_signals},
    progress::state::ProgressStore,
};

use super::{
    dialogue_panel::{
        components::DialoguePanelSettings,
        systems::{handle_dialogue_buttons, spawn_dialogue_panels, sync_dialogue_panels},
    },
    end_screen::{
        components::PendingEndScreen,
        systems::{
            despawn_end_screen, detect_game_completion, handle_end_screen_input, spawn_end_screen,
        },
    },
    hud::systems::{
        animate_counter_pop, hide_hud, show_hud, spawn_hud, update_collection_counter,
    },
    menu::systems::{animate_main_menu, despawn_main_menu, spawn_main_menu, start_game_on_space},
    widgets::tint_buttons,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.insert_resource(DialoguePanelSettings::default())
            .init_resource::<UiSettings>()
            .init_resource::<PendingEndScreen>()
            .add_systems(Startup, (spawn_dialogue_panels, spawn_hud))
            .add_systems(OnEnter(GameState::MainMenu), spawn_main_menu)
            .add_systems(OnExit(GameState::MainMenu), despawn_main_menu)
            .add_systems(OnEnter(GameState::Playing), show_hud)
            .add_systems(OnExit(GameState::Playing), hide_hud)
            .add_systems(OnEnter(GameState::EndScreen), spawn_end_screen)
            .add_systems(OnExit(GameState::EndScreen), despawn_end_screen)
            .add_systems(
                Update,
                (
                    (start_game_on_space, animate_main_menu)
                        .chain()
                        .run_if(in_state(GameState::MainMenu)),
                    sync_dialogue_panels
                        .after(publish_dialogue_signals)
                        .run_if(resource_changed::<DialogueSequencer>),
                    handle_dialogue_buttons.run_if(in_state(GameState::Playing)),
                    tint_buttons,
                    update_collection_counter.run_if(resource_changed::<ProgressStore>),
                    animate_counter_pop.after(update_collection_counter),
                    detect_game_completion.run_if(in_state(GameState::Playing)),
                    handle_end_screen_input.run_if(in_state(GameState::EndScreen)),
                ),
            );
    }
}
