//! Interaction plugin wiring proximity, picking, and highlight systems.
use bevy::prelude::*;

use crate::core::{config::InteractionSettings, state::GameState};

use super::{
    events::{InteractRequest, RangeChangedEvent},
    systems::{
        apply_interaction_highlight, detect_interaction_input, update_interaction_indicators,
        update_interaction_ranges,
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionSettings>()
            .add_message::<RangeChangedEvent>()
            .add_message::<InteractRequest>()
            .add_systems(
                Update,
                (
                    update_interaction_ranges,
                    detect_interaction_input.after(update_interaction_ranges),
                    apply_interaction_highlight.after(update_interaction_ranges),
                    update_interaction_indicators.after(update_interaction_ranges),
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
