// src/ui/end_screen/systems.rs
//
// Marks the game complete, shows the end screen after a delay and applies the
// player's restart/continue choice.

use bevy::prelude::*;

use crate::{
    core::{
        config::UiSettings,
        state::{GameState, LevelEntity},
    },
    dialogue::sequencer::DialogueSequencer,
    progress::state::ProgressStore,
    ui::widgets::{spawn_button, BORDER_COLOR, NAME_COLOR, PANEL_COLOR, TEXT_COLOR},
    world::systems::despawn_level,
};

use super::components::{completion_message, EndScreenChoice, EndScreenRoot, PendingEndScreen};

/// Completes the game when the last animal is collected, then opens the end
/// screen after `end_screen_delay`.
pub fn detect_game_completion(
    time: Res<Time>,
    settings: Res<UiSettings>,
    mut progress: ResMut<ProgressStore>,
    mut pending: ResMut<PendingEndScreen>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !pending.is_pending() && progress.all_collected() && !progress.is_game_completed() {
        progress.complete_game();
        pending.start(settings.end_screen_delay);
        info!(
            "All {} animals collected; end screen in {:.1}s",
            progress.total_required(),
            settings.end_screen_delay
        );
    }

    if pending.tick(time.delta()) {
        next_state.set(GameState::EndScreen);
    }
}

pub fn spawn_end_screen(mut commands: Commands, progress: Res<ProgressStore>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            EndScreenRoot,
            Name::new("End Screen"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(20.0),
                        padding: UiRect::all(Val::Px(32.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(PANEL_COLOR),
                    BorderColor::from(BORDER_COLOR),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(completion_message(progress.total_required())),
                        TextFont {
                            font_size: 32.0,
                            ..default()
                        },
                        TextColor(NAME_COLOR),
                    ));
                    panel.spawn((
                        Text::new("Space: play again    P: keep exploring"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                    panel
                        .spawn(Node {
                            column_gap: Val::Px(24.0),
                            ..default()
                        })
                        .with_children(|row| {
                            spawn_button(row, "Restart", EndScreenChoice::Restart);
                            spawn_button(row, "Continue", EndScreenChoice::Continue);
                        });
                });
        });
}

pub fn despawn_end_screen(mut commands: Commands, roots: Query<Entity, With<EndScreenRoot>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}

fn read_choice(
    keyboard: &ButtonInput<KeyCode>,
    buttons: &Query<(&Interaction, &EndScreenChoice), Changed<Interaction>>,
) -> Option<EndScreenChoice> {
    if keyboard.just_pressed(KeyCode::Space) {
        return Some(EndScreenChoice::Restart);
    }
    if keyboard.just_pressed(KeyCode::KeyP) {
        return Some(EndScreenChoice::Continue);
    }
    buttons
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, choice)| *choice)
}

/// Space or Restart wipes progress and rebuilds the level; P or Continue resumes.
#[allow(clippy::too_many_arguments)]
pub fn handle_end_screen_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    buttons: Query<(&Interaction, &EndScreenChoice), Changed<Interaction>>,
    level: Query<Entity, With<LevelEntity>>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut progress: ResMut<ProgressStore>,
    mut pending: ResMut<PendingEndScreen>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(choice) = read_choice(&keyboard, &buttons) else {
        return;
    };

    match choice {
        EndScreenChoice::Restart => {
            info!("Restarting game");
            sequencer.clear();
            progress.reset();
            pending.cancel();
            despawn_level(&mut commands, &level);
        }
        EndScreenChoice::Continue => info!("Continuing with finished town"),
    }
    next_state.set(GameState::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{config::DialogueSettings, state::configure_level_spawning},
        progress::store::MemoryStore,
    };
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn spawn_level_marker(mut commands: Commands) {
        commands.spawn(LevelEntity);
    }

    fn end_screen_app(total: usize) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<GameState>()
            .init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<PendingEndScreen>()
            .insert_resource(UiSettings {
                end_screen_delay: 1.0,
                ..default()
            })
            .insert_resource(DialogueSequencer::new(&DialogueSettings::default()))
            .insert_resource(ProgressStore::load(
                Box::new(MemoryStore::new()),
                "progress",
                total,
            ))
            .add_systems(
                Update,
                (
                    detect_game_completion.run_if(in_state(GameState::Playing)),
                    handle_end_screen_input.run_if(in_state(GameState::EndScreen)),
                ),
            );
        configure_level_spawning(&mut app);
        app.add_systems(
            OnEnter(GameState::Playing),
            spawn_level_marker.in_set(crate::core::state::LevelSpawnSet),
        );
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
        app.update();
        app
    }

    fn step(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release_all();
        keyboard.clear();
        keyboard.press(key);
    }

    fn level_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<LevelEntity>>()
            .iter(app.world())
            .count()
    }

    fn collect_all(app: &mut App) {
        let mut progress = app.world_mut().resource_mut::<ProgressStore>();
        progress.collect("cat", "A cat", None);
        progress.collect("dog", "A dog", None);
    }

    #[test]
    fn end_screen_waits_for_delay_then_restart_resets() {
        let mut app = end_screen_app(2);
        assert_eq!(state(&app), GameState::Playing);
        assert_eq!(level_count(&mut app), 1);

        collect_all(&mut app);
        step(&mut app, 0.5);
        assert!(app.world().resource::<ProgressStore>().is_game_completed());
        assert_eq!(state(&app), GameState::Playing);

        step(&mut app, 0.6);
        step(&mut app, 0.0);
        assert_eq!(state(&app), GameState::EndScreen);

        press(&mut app, KeyCode::Space);
        step(&mut app, 0.0);
        step(&mut app, 0.0);
        assert_eq!(state(&app), GameState::Playing);
        let progress = app.world().resource::<ProgressStore>();
        assert_eq!(progress.collected_count(), 0);
        assert!(!progress.is_game_completed());
        assert_eq!(level_count(&mut app), 1);
    }

    #[test]
    fn continue_keeps_progress_and_does_not_reopen() {
        let mut app = end_screen_app(2);
        collect_all(&mut app);
        step(&mut app, 1.5);
        step(&mut app, 0.0);
        assert_eq!(state(&app), GameState::EndScreen);

        press(&mut app, KeyCode::KeyP);
        step(&mut app, 0.0);
        step(&mut app, 0.0);
        assert_eq!(state(&app), GameState::Playing);
        assert_eq!(app.world().resource::<ProgressStore>().collected_count(), 2);

        for _ in 0..5 {
            step(&mut app, 1.0);
        }
        assert_eq!(state(&app), GameState::Playing);
    }
}
