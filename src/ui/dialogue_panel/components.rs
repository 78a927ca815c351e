// src/ui/dialogue_panel/components.rs
//
// Markers and layout settings for the dialogue and prompt panels.

use bevy::prelude::*;

/// Root of the bottom-of-screen dialogue panel. Hidden while no session is open.
#[derive(Component, Debug)]
pub struct DialoguePanel;

/// Text node showing the speaker's name.
#[derive(Component, Debug)]
pub struct SpeakerNameText;

/// Text node showing the revealed part of the current line.
#[derive(Component, Debug)]
pub struct DialogueBodyText;

/// Button that advances the dialogue like the advance key.
#[derive(Component, Debug)]
pub struct NextButton;

/// Root of the yes/no prompt panel.
#[derive(Component, Debug)]
pub struct PromptPanel;

/// Text node showing the prompt question.
#[derive(Component, Debug)]
pub struct PromptMessageText;

/// Yes or No button of the prompt panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct PromptButton {
    pub accept: bool,
}

/// Resource containing layout settings for the dialogue panels.
#[derive(Resource, Debug)]
pub struct DialoguePanelSettings {
    /// Panel width (pixels).
    pub panel_width: f32,

    /// Padding inside panel (pixels).
    pub padding: f32,

    /// Border width (pixels).
    pub border_width: f32,

    /// Offset from bottom edge of screen (pixels).
    pub bottom_offset: f32,

    /// Font size for NPC name (points).
    pub name_font_size: f32,

    /// Font size for dialogue text (points).
    pub text_font_size: f32,
}

impl Default for DialoguePanelSettings {
    fn default() -> Self {
        Self {
            panel_width: 640.0,
            padding: 14.0,
            border_width: 2.0,
            bottom_offset: 24.0,
            name_font_size: 20.0,
            text_font_size: 18.0,
        }
    }
}
