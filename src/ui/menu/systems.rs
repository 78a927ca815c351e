// src/ui/menu/systems.rs
//
// Spawning, animating and leaving the title screen.

use bevy::prelude::*;

use crate::{core::state::GameState, ui::widgets::NAME_COLOR};

use super::components::{MainMenuScreen, MenuText, MenuTitle, StartPrompt};

const BACKGROUND: Color = Color::srgb(0.16, 0.24, 0.2);
const TITLE_TOP: f32 = 80.0;

pub fn spawn_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(BACKGROUND.with_alpha(0.0)),
            MainMenuScreen::default(),
            Name::new("Main Menu"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Pet Town"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(NAME_COLOR.with_alpha(0.0)),
                Node {
                    margin: UiRect::top(Val::Px(TITLE_TOP)),
                    ..default()
                },
                MenuTitle {
                    base_top: TITLE_TOP,
                },
            ));
            parent.spawn((
                Text::new(
                    "Nine animals are lost around town.\nFind them all and bring them to the shelter.",
                ),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                MenuText,
            ));
            parent.spawn((
                Text::new(
                    "WASD / arrows or click: move    E or click: talk\nSpace: next line    Y / N: answer    1 2 3: zoom    Shift: orbit",
                ),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8).with_alpha(0.0)),
                MenuText,
            ));
            parent.spawn((
                Text::new("Press Space to start"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                StartPrompt,
            ));
        });
}

pub fn despawn_main_menu(mut commands: Commands, screens: Query<Entity, With<MainMenuScreen>>) {
    for entity in screens.iter() {
        commands.entity(entity).despawn();
    }
}

/// Space starts the fade-out toward play.
pub fn start_game_on_space(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut screens: Query<&mut MainMenuScreen>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    for mut screen in screens.iter_mut() {
        if screen.start_leaving() {
            info!("Starting game");
        }
    }
}

/// Title float, prompt pulse and the fades; enters play once faded out.
#[allow(clippy::type_complexity)]
pub fn animate_main_menu(
    time: Res<Time>,
    mut screens: Query<(&mut MainMenuScreen, &mut BackgroundColor)>,
    mut titles: Query<(&MenuTitle, &mut Node, &mut TextColor), (Without<StartPrompt>, Without<MenuText>)>,
    mut prompts: Query<&mut TextColor, (With<StartPrompt>, Without<MenuTitle>, Without<MenuText>)>,
    mut texts: Query<&mut TextColor, (With<MenuText>, Without<MenuTitle>, Without<StartPrompt>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok((mut screen, mut background)) = screens.single_mut() else {
        return;
    };
    let frame = screen.tick(time.delta_secs());

    background.0 = background.0.with_alpha(frame.alpha);
    for (title, mut node, mut color) in titles.iter_mut() {
        node.margin.top = Val::Px(title.base_top + frame.title_offset);
        color.0 = color.0.with_alpha(frame.alpha);
    }
    for mut color in prompts.iter_mut() {
        color.0 = color.0.with_alpha(frame.prompt_alpha);
    }
    for mut color in texts.iter_mut() {
        color.0 = color.0.with_alpha(frame.alpha);
    }

    if frame.finished {
        next_state.set(GameState::Playing);
    }
}
