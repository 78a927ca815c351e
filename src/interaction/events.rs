//! Messages emitted by the interaction trigger.
use bevy::prelude::*;

/// The player crossed an interactable's radius.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeChangedEvent {
    pub entity: Entity,
    pub entered: bool,
}

/// How an interaction was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractSource {
    Pointer,
    Key,
}

/// The player asked to interact with `entity`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractRequest {
    pub entity: Entity,
    pub source: InteractSource,
}
