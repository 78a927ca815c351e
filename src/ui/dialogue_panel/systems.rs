// src/ui/dialogue_panel/systems.rs
//
// Systems mirroring the dialogue sequencer into the panel UI and feeding
// button presses back into it.

use bevy::prelude::*;

use crate::{
    dialogue::sequencer::DialogueSequencer,
    ui::widgets::{spawn_button, BORDER_COLOR, NAME_COLOR, PANEL_COLOR, TEXT_COLOR},
};

use super::components::{
    DialogueBodyText, DialoguePanel, DialoguePanelSettings, NextButton, PromptButton,
    PromptMessageText, PromptPanel, SpeakerNameText,
};

/// Spawns both panels once, hidden until the sequencer opens something.
pub fn spawn_dialogue_panels(mut commands: Commands, settings: Res<DialoguePanelSettings>) {
    let centered = |bottom: f32| Node {
        position_type: PositionType::Absolute,
        bottom: Val::Px(bottom),
        left: Val::Percent(50.0),
        margin: UiRect::left(Val::Px(-settings.panel_width / 2.0)),
        width: Val::Px(settings.panel_width),
        padding: UiRect::all(Val::Px(settings.padding)),
        border: UiRect::all(Val::Px(settings.border_width)),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(8.0),
        ..default()
    };

    commands
        .spawn((
            centered(settings.bottom_offset),
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(BORDER_COLOR),
            Visibility::Hidden,
            DialoguePanel,
            Name::new("Dialogue Panel"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.name_font_size,
                    ..default()
                },
                TextColor(NAME_COLOR),
                SpeakerNameText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                DialogueBodyText,
            ));
            parent
                .spawn(Node {
                    justify_content: JustifyContent::FlexEnd,
                    ..default()
                })
                .with_children(|row| spawn_button(row, "Next", NextButton));
        });

    commands
        .spawn((
            centered(settings.bottom_offset),
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(BORDER_COLOR),
            Visibility::Hidden,
            PromptPanel,
            Name::new("Prompt Panel"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                PromptMessageText,
            ));
            parent
                .spawn(Node {
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Yes (Y)", PromptButton { accept: true });
                    spawn_button(row, "No (N)", PromptButton { accept: false });
                });
        });
}

fn set_text(text: &mut Text, wanted: &str) {
    if text.0 != wanted {
        text.0 = wanted.to_string();
    }
}

/// Shows the panels that match the sequencer state and refreshes their text.
#[allow(clippy::type_complexity)]
pub fn sync_dialogue_panels(
    sequencer: Res<DialogueSequencer>,
    mut dialogue_panel: Query<&mut Visibility, (With<DialoguePanel>, Without<PromptPanel>)>,
    mut prompt_panel: Query<&mut Visibility, (With<PromptPanel>, Without<DialoguePanel>)>,
    mut names: Query<
        &mut Text,
        (
            With<SpeakerNameText>,
            Without<DialogueBodyText>,
            Without<PromptMessageText>,
        ),
    >,
    mut bodies: Query<
        &mut Text,
        (
            With<DialogueBodyText>,
            Without<SpeakerNameText>,
            Without<PromptMessageText>,
        ),
    >,
    mut prompts: Query<
        &mut Text,
        (
            With<PromptMessageText>,
            Without<SpeakerNameText>,
            Without<DialogueBodyText>,
        ),
    >,
) {
    let showing_dialogue = sequencer.is_active();
    let showing_prompt = sequencer.is_prompt_open();

    for mut visibility in dialogue_panel.iter_mut() {
        visibility.set_if_neq(if showing_dialogue {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });
    }
    for mut visibility in prompt_panel.iter_mut() {
        visibility.set_if_neq(if showing_prompt {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });
    }

    if let (Some(speaker), Some(visible)) = (sequencer.speaker(), sequencer.visible_text()) {
        for mut text in names.iter_mut() {
            set_text(&mut text, speaker);
        }
        for mut text in bodies.iter_mut() {
            set_text(&mut text, visible);
        }
    }
    if let Some(message) = sequencer.prompt_message() {
        for mut text in prompts.iter_mut() {
            set_text(&mut text, message);
        }
    }
}

/// Next advances the session; Yes/No answer the prompt.
#[allow(clippy::type_complexity)]
pub fn handle_dialogue_buttons(
    next_buttons: Query<&Interaction, (Changed<Interaction>, With<NextButton>)>,
    prompt_buttons: Query<(&Interaction, &PromptButton), Changed<Interaction>>,
    mut sequencer: ResMut<DialogueSequencer>,
) {
    if next_buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        sequencer.advance();
    }

    for (interaction, button) in prompt_buttons.iter() {
        if *interaction == Interaction::Pressed {
            sequencer.respond(button.accept);
        }
    }
}
