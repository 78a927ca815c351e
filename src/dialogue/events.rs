//! Messages published from the dialogue sequencer's buffered signals.
use bevy::prelude::*;

use super::types::{DialogueCallback, PromptCallback};

/// The camera should frame `focus`, or return to its default view when `None`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DialogueFocusEvent {
    pub focus: Option<Vec3>,
}

/// A dialogue session ended and its continuation is due.
///
/// `forced` is set when a newer session replaced this one; handlers must
/// then skip any follow-up dialogue.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DialogueCompletedEvent {
    pub callback: DialogueCallback,
    pub forced: bool,
}

/// The yes/no prompt was answered (or replaced, in which case `forced`).
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PromptResolvedEvent {
    pub callback: PromptCallback,
    pub accepted: bool,
    pub forced: bool,
}

/// A typewriter tick that should be voiced by an audio layer.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct TypingBlipEvent;
