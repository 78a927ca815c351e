//! Shared button styling for every screen.
use bevy::prelude::*;

pub const PANEL_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);
pub const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
pub const TEXT_COLOR: Color = Color::WHITE;
pub const NAME_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);

const BUTTON_IDLE: Color = Color::srgba(0.18, 0.18, 0.22, 0.95);
const BUTTON_HOVERED: Color = Color::srgba(0.28, 0.28, 0.34, 0.95);
const BUTTON_PRESSED: Color = Color::srgba(0.4, 0.35, 0.15, 0.95);

/// Spawns a labelled button carrying `marker`.
pub fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, marker: impl Bundle) {
    parent
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.5)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Button,
            Interaction::None,
            BackgroundColor(BUTTON_IDLE),
            BorderColor::from(Color::srgb(0.4, 0.4, 0.45)),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

/// Hover and press feedback.
pub fn tint_buttons(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
    }
}
