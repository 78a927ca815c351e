// src/ui/hud/systems.rs
//
// Systems keeping the counter label in sync with the progress store.

use bevy::prelude::*;

use crate::{
    core::config::UiSettings,
    progress::state::ProgressStore,
    ui::widgets::{PANEL_COLOR, TEXT_COLOR},
};

use super::components::{counter_label, CollectionCounter, HudRoot};

const COUNTER_FONT_SIZE: f32 = 24.0;

/// Spawns the HUD hidden; it is shown on entering play.
pub fn spawn_hud(mut commands: Commands, progress: Res<ProgressStore>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Visibility::Hidden,
            HudRoot,
            Name::new("HUD"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(counter_label(
                    progress.collected_count(),
                    progress.total_required(),
                )),
                TextFont {
                    font_size: COUNTER_FONT_SIZE,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                CollectionCounter::new(progress.collected_count(), COUNTER_FONT_SIZE),
            ));
        });
}

pub fn show_hud(mut hud: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in hud.iter_mut() {
        visibility.set_if_neq(Visibility::Visible);
    }
}

pub fn hide_hud(mut hud: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in hud.iter_mut() {
        visibility.set_if_neq(Visibility::Hidden);
    }
}

/// Rewrites the label and starts a pop when the count grows.
pub fn update_collection_counter(
    progress: Res<ProgressStore>,
    settings: Res<UiSettings>,
    mut counters: Query<(&mut CollectionCounter, &mut Text)>,
) {
    let found = progress.collected_count();
    let label = counter_label(found, progress.total_required());
    for (mut counter, mut text) in counters.iter_mut() {
        if counter.observe(found, settings.counter_pop) {
            debug!("Counter pops at {}", label);
        }
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

pub fn animate_counter_pop(
    time: Res<Time>,
    mut counters: Query<(&mut CollectionCounter, &mut TextFont)>,
) {
    let delta = time.delta_secs();
    for (mut counter, mut font) in counters.iter_mut() {
        if let Some(size) = counter.tick(delta) {
            font.font_size = size;
        }
    }
}
