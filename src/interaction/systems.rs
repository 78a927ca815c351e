//! Systems tracking player proximity and turning input into interaction requests.
use bevy::{prelude::*, window::PrimaryWindow};

use crate::{
    camera::components::CameraRig, core::config::InteractionSettings, player::components::Player,
};

use super::{
    components::{
        Deactivated, HighlightMaterials, Interactable, InteractionIndicator, PickCollider,
        RangeTransition,
    },
    events::{InteractRequest, InteractSource, RangeChangedEvent},
    picking::{pick_nearest, pointer_ray, PickCandidate},
};

/// Height above the player's feet the interact-key ray starts from.
pub const KEY_RAY_HEIGHT: f32 = 0.8;

/// Flips `in_range` on radius crossings and reports each edge once.
#[allow(clippy::type_complexity)]
pub fn update_interaction_ranges(
    player: Query<&Transform, With<Player>>,
    mut interactables: Query<
        (Entity, &Transform, &mut Interactable),
        (Without<Player>, Without<Deactivated>),
    >,
    mut range_events: MessageWriter<RangeChangedEvent>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let player_pos = player_transform.translation;

    for (entity, transform, mut interactable) in interactables.iter_mut() {
        let distance = player_pos.distance(transform.translation);
        if (distance <= interactable.radius) == interactable.in_range() {
            continue;
        }

        let Some(transition) = interactable.observe_distance(distance) else {
            continue;
        };
        let entered = transition == RangeTransition::Entered;
        debug!(
            "Player {} range of {} ({:.2} / {:.2})",
            if entered { "entered" } else { "left" },
            interactable.name,
            distance,
            interactable.radius
        );
        range_events.write(RangeChangedEvent { entity, entered });
    }
}

/// Resolves a click or interact key press to at most one interactable.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn detect_interaction_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<InteractionSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<CameraRig>>,
    ui_buttons: Query<&Interaction, With<Button>>,
    player: Query<&Transform, With<Player>>,
    candidates: Query<
        (Entity, &Transform, &Interactable, &PickCollider),
        (Without<Player>, Without<Deactivated>),
    >,
    mut requests: MessageWriter<InteractRequest>,
) {
    let source = if mouse.just_pressed(MouseButton::Left) {
        InteractSource::Pointer
    } else if keyboard.just_pressed(settings.interact_key) {
        InteractSource::Key
    } else {
        return;
    };

    let ray = match source {
        InteractSource::Pointer => {
            if ui_buttons
                .iter()
                .any(|interaction| *interaction != Interaction::None)
            {
                return;
            }
            let (Ok(window), Ok((camera, camera_transform))) = (windows.single(), cameras.single())
            else {
                return;
            };
            pointer_ray(window, camera, camera_transform)
        }
        InteractSource::Key => player
            .single()
            .ok()
            .map(|transform| {
                Ray3d::new(
                    transform.translation + Vec3::Y * KEY_RAY_HEIGHT,
                    transform.forward(),
                )
            }),
    };
    let Some(ray) = ray else {
        return;
    };

    let hit = pick_nearest(
        ray,
        settings.max_ray_distance,
        candidates
            .iter()
            .map(|(entity, transform, _, collider)| PickCandidate {
                entity,
                center: collider.center(transform),
                radius: collider.radius,
            }),
    );
    let Some((entity, _)) = hit else {
        return;
    };

    if source == InteractSource::Key {
        let (Ok(player_transform), Ok((_, transform, interactable, _))) =
            (player.single(), candidates.get(entity))
        else {
            return;
        };
        let distance = player_transform.translation.distance(transform.translation);
        if distance > interactable.radius {
            debug!(
                "{} is too far to interact ({:.2} > {:.2})",
                interactable.name, distance, interactable.radius
            );
            return;
        }
    }

    requests.write(InteractRequest { entity, source });
}

/// Swaps in the highlight material while the player is in range.
///
/// Range changes during an interaction are ignored until it ends.
pub fn apply_interaction_highlight(
    mut query: Query<
        (
            &Interactable,
            &HighlightMaterials,
            &mut MeshMaterial3d<StandardMaterial>,
        ),
        Changed<Interactable>,
    >,
) {
    for (interactable, materials, mut material) in query.iter_mut() {
        if interactable.is_interacting() {
            continue;
        }
        let wanted = if interactable.in_range() {
            &materials.highlighted
        } else {
            &materials.normal
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// Shows each indicator exactly while its parent is in range.
pub fn update_interaction_indicators(
    mut indicators: Query<(&ChildOf, &mut Visibility), With<InteractionIndicator>>,
    parents: Query<&Interactable>,
) {
    for (child_of, mut visibility) in indicators.iter_mut() {
        let Ok(interactable) = parents.get(child_of.parent()) else {
            continue;
        };
        let wanted = if interactable.in_range() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}
