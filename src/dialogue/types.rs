//! Continuations and signals exchanged between the sequencer and its callers.
use bevy::prelude::*;

/// What should happen once a dialogue session closes.
///
/// Each variant names the interactable that requested the session. A
/// continuation is handed back exactly once, either when the player closes
/// the session or when a newer session forces it to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueCallback {
    /// The interaction is over; clear the entity's interacting flag.
    EndInteraction(Entity),
    /// The intro lines are done; offer the yes/no collection prompt.
    OfferCollection(Entity),
    /// The thank-you line is done; remove the collected animal from the world.
    DeactivateCollected(Entity),
}

impl DialogueCallback {
    pub fn owner(self) -> Entity {
        match self {
            Self::EndInteraction(entity)
            | Self::OfferCollection(entity)
            | Self::DeactivateCollected(entity) => entity,
        }
    }
}

/// What should happen once a yes/no prompt is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCallback {
    /// Record the entity's animal when the answer is yes.
    Collect(Entity),
}

/// Sequencer state as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    Idle,
    Typing,
    AwaitingAdvance,
}

/// Side effects buffered by the sequencer until the next publish pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueSignal {
    /// A panel opened and wants the camera framed on `focus`.
    Opened { focus: Vec3 },
    /// A panel closed and the camera may return to its default view.
    Closed,
    Completed {
        callback: DialogueCallback,
        forced: bool,
    },
    PromptResolved {
        callback: PromptCallback,
        accepted: bool,
        forced: bool,
    },
    /// A typewriter tick worth voicing.
    TypingBlip,
}
