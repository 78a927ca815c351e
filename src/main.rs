use bevy::prelude::*;

mod camera;
mod core;
mod dialogue;
mod interaction;
mod npc;
mod player;
mod progress;
mod ui;
mod world;

use crate::{
    camera::CameraPlugin, core::CorePlugin, dialogue::DialoguePlugin,
    interaction::InteractionPlugin, npc::NpcPlugin, player::PlayerPlugin,
    progress::ProgressPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Pet Town".into(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::default(), // Before every plugin that reads settings while building
            ProgressPlugin,
            DialoguePlugin,
            InteractionPlugin,
            NpcPlugin,
            PlayerPlugin,
            CameraPlugin,
            WorldPlugin,
            UiPlugin,
        ))
        .run();
}
