//! Systems turning interaction requests into dialogue flows and reacting to their outcome.
use bevy::prelude::*;

use crate::{
    dialogue::{
        events::{DialogueCompletedEvent, PromptResolvedEvent},
        sequencer::DialogueSequencer,
        types::{DialogueCallback, PromptCallback},
    },
    interaction::{
        components::{anchor_point, Deactivated, DialogueAnchor, Interactable},
        events::InteractRequest,
    },
    player::components::Player,
    progress::state::ProgressStore,
};

use super::components::{
    Collectible, CyclicDialogue, DialogueRng, FacingTurn, MarksVolunteerChief, TurnsToFace,
};

/// Starts the dialogue flow of every interactable the player asked for.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn handle_interact_requests(
    mut requests: MessageReader<InteractRequest>,
    mut npcs: Query<
        (
            &mut Interactable,
            &Transform,
            Option<&DialogueAnchor>,
            Option<&mut CyclicDialogue>,
            Option<&Collectible>,
            Option<&TurnsToFace>,
            Has<MarksVolunteerChief>,
        ),
        Without<Deactivated>,
    >,
    player: Query<&Transform, (With<Player>, Without<Interactable>)>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut rng: ResMut<DialogueRng>,
    mut progress: ResMut<ProgressStore>,
    mut commands: Commands,
) {
    for request in requests.read() {
        let Ok((mut interactable, transform, anchor, chatter, collectible, turns, is_chief)) =
            npcs.get_mut(request.entity)
        else {
            continue;
        };
        if !interactable.in_range() {
            debug!("Ignoring interaction with {}: out of range", interactable.name);
            continue;
        }
        let focus = anchor_point(transform, anchor);

        if let Some(collectible) = collectible {
            if collectible.is_collected() {
                continue;
            }
            interactable.begin_interaction();
            info!("{} starts its introduction", interactable.name);
            sequencer.show_sequence(
                interactable.name.clone(),
                collectible.intro_lines.clone(),
                focus,
                Some(DialogueCallback::OfferCollection(request.entity)),
            );
            continue;
        }

        let Some(mut chatter) = chatter else {
            continue;
        };
        interactable.begin_interaction();

        if is_chief {
            if !progress.has_met_volunteer_chief() {
                progress.set_met_volunteer_chief(true);
            }
            if progress.is_game_completed() && !chatter.uses_alternative() {
                chatter.set_alternative_mode(true);
            }
        }

        if let (Some(turns), Ok(player_transform)) = (turns, player.single()) {
            if let Some(turn) =
                FacingTurn::toward(transform, player_transform.translation, turns.turn_speed)
            {
                commands.entity(request.entity).insert(turn);
            }
        }

        let Some(line) = chatter.next_line(&mut rng.0) else {
            debug!("{} has nothing to say", interactable.name);
            interactable.end_interaction();
            continue;
        };
        sequencer.show(
            interactable.name.clone(),
            line,
            focus,
            Some(DialogueCallback::EndInteraction(request.entity)),
        );
    }
}

/// Applies the continuation of every dialogue session that just closed.
pub fn handle_dialogue_completions(
    mut completions: MessageReader<DialogueCompletedEvent>,
    mut npcs: Query<(
        &mut Interactable,
        &Transform,
        Option<&DialogueAnchor>,
        Option<&Collectible>,
    )>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut commands: Commands,
) {
    for completion in completions.read() {
        let entity = completion.callback.owner();
        let Ok((mut interactable, transform, anchor, collectible)) = npcs.get_mut(entity) else {
            warn!("Dialogue completed for missing entity {:?}", entity);
            continue;
        };

        // A forced completion of the entity's own restarted flow keeps it interacting.
        let restarted = completion.forced && sequencer.is_owned_by(entity);

        match completion.callback {
            DialogueCallback::EndInteraction(_) if restarted => {}
            DialogueCallback::EndInteraction(_) => interactable.end_interaction(),
            DialogueCallback::OfferCollection(_) => {
                let offer = collectible.filter(|c| !c.is_collected() && !completion.forced);
                match offer {
                    Some(collectible) => sequencer.show_prompt(
                        collectible.collection_prompt.clone(),
                        anchor_point(transform, anchor),
                        Some(PromptCallback::Collect(entity)),
                    ),
                    None if restarted => {}
                    None => interactable.end_interaction(),
                }
            }
            DialogueCallback::DeactivateCollected(_) => {
                interactable.end_interaction();
                info!("{} leaves with the player", interactable.name);
                commands
                    .entity(entity)
                    .insert((Deactivated, Visibility::Hidden));
            }
        }
    }
}

/// Records the animal on "yes" and plays its farewell line.
pub fn handle_prompt_responses(
    mut responses: MessageReader<PromptResolvedEvent>,
    mut npcs: Query<(
        &mut Interactable,
        &mut Collectible,
        &Transform,
        Option<&DialogueAnchor>,
    )>,
    mut progress: ResMut<ProgressStore>,
    mut sequencer: ResMut<DialogueSequencer>,
) {
    for response in responses.read() {
        let PromptCallback::Collect(entity) = response.callback;
        let Ok((mut interactable, mut collectible, transform, anchor)) = npcs.get_mut(entity)
        else {
            warn!("Prompt answered for missing entity {:?}", entity);
            continue;
        };

        if response.forced && sequencer.is_owned_by(entity) {
            continue;
        }
        if !response.accepted || response.forced || collectible.is_collected() {
            interactable.end_interaction();
            continue;
        }

        collectible.mark_collected();
        progress.collect(
            collectible.kind.clone(),
            collectible.description.clone(),
            collectible.icon.clone(),
        );
        sequencer.show(
            interactable.name.clone(),
            collectible.post_collection_line.clone(),
            anchor_point(transform, anchor),
            Some(DialogueCallback::DeactivateCollected(entity)),
        );
    }
}

/// Hides animals that were taken in during an earlier session.
pub fn deactivate_already_collected(
    mut spawned: Query<(Entity, &mut Collectible), Added<Collectible>>,
    progress: Res<ProgressStore>,
    mut commands: Commands,
) {
    for (entity, mut collectible) in spawned.iter_mut() {
        if !progress.is_collected(&collectible.kind) {
            continue;
        }
        collectible.mark_collected();
        commands
            .entity(entity)
            .insert((Deactivated, Visibility::Hidden));
    }
}

/// Steps every in-flight turn-to-face and drops it when done.
pub fn advance_facing_turns(
    time: Res<Time>,
    mut turning: Query<(Entity, &mut Transform, &mut FacingTurn)>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();
    for (entity, mut transform, mut turn) in turning.iter_mut() {
        let (rotation, finished) = turn.tick(delta);
        transform.rotation = rotation;
        if finished {
            commands.entity(entity).remove::<FacingTurn>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    use crate::{
        core::config::DialogueSettings,
        dialogue::{
            events::{DialogueFocusEvent, TypingBlipEvent},
            systems::publish_dialogue_signals,
        },
        interaction::events::InteractSource,
        npc::components::DEFAULT_POST_COLLECTION_LINE,
        progress::store::MemoryStore,
    };

    fn npc_app() -> App {
        let settings = DialogueSettings {
            typewriter: false,
            ..default()
        };
        let mut app = App::new();
        app.insert_resource(DialogueSequencer::new(&settings))
            .insert_resource(DialogueRng::seeded(3))
            .insert_resource(ProgressStore::load(
                Box::new(MemoryStore::new()),
                "PetTownSaveData",
                9,
            ))
            .add_message::<InteractRequest>()
            .add_message::<DialogueFocusEvent>()
            .add_message::<DialogueCompletedEvent>()
            .add_message::<PromptResolvedEvent>()
            .add_message::<TypingBlipEvent>()
            .add_systems(
                Update,
                (
                    deactivate_already_collected,
                    handle_interact_requests,
                    publish_dialogue_signals,
                    handle_dialogue_completions,
                    handle_prompt_responses,
                )
                    .chain(),
            );
        app.world_mut().spawn((Player, Transform::from_xyz(0.0, 0.0, 1.0)));
        app
    }

    fn in_range(name: &str) -> Interactable {
        let mut interactable = Interactable::new(name, 2.0);
        interactable.observe_distance(1.0);
        interactable
    }

    fn interact(app: &mut App, entity: Entity) {
        app.world_mut()
            .resource_mut::<Messages<InteractRequest>>()
            .write(InteractRequest {
                entity,
                source: InteractSource::Key,
            });
        app.update();
    }

    fn sequencer(app: &mut App) -> Mut<'_, DialogueSequencer> {
        app.world_mut().resource_mut::<DialogueSequencer>()
    }

    #[test]
    fn chatter_cycles_through_lines() {
        let mut app = npc_app();
        let npc = app
            .world_mut()
            .spawn((
                in_range("Baker"),
                CyclicDialogue::new(["Hi", "Bye"]),
                Transform::default(),
            ))
            .id();

        let mut seen = Vec::new();
        for _ in 0..3 {
            interact(&mut app, npc);
            seen.push(sequencer(&mut app).full_text().unwrap().to_string());
            sequencer(&mut app).advance();
            app.update();
            assert!(!app.world().get::<Interactable>(npc).unwrap().is_interacting());
        }
        assert_eq!(seen, ["Hi", "Bye", "Hi"]);
    }

    #[test]
    fn out_of_range_request_is_ignored() {
        let mut app = npc_app();
        let npc = app
            .world_mut()
            .spawn((
                Interactable::new("Baker", 2.0),
                CyclicDialogue::new(["Hi"]),
                Transform::default(),
            ))
            .id();
        interact(&mut app, npc);
        assert!(!sequencer(&mut app).is_active());
    }

    #[test]
    fn chief_sets_milestone_and_faces_player() {
        let mut app = npc_app();
        let chief = app
            .world_mut()
            .spawn((
                in_range("Chief"),
                CyclicDialogue::new(["Welcome!"]).with_alternative(["You did it!"]),
                MarksVolunteerChief,
                TurnsToFace::default(),
                Transform::default(),
            ))
            .id();

        interact(&mut app, chief);
        assert!(app.world().resource::<ProgressStore>().has_met_volunteer_chief());
        assert!(app.world().get::<FacingTurn>(chief).is_some());
        assert_eq!(sequencer(&mut app).full_text(), Some("Welcome!"));

        app.world_mut().resource_mut::<ProgressStore>().complete_game();
        interact(&mut app, chief);
        assert_eq!(sequencer(&mut app).full_text(), Some("You did it!"));
    }

    #[test]
    fn accepting_collects_once_and_deactivates() {
        let mut app = npc_app();
        let cat = app
            .world_mut()
            .spawn((
                in_range("Whiskers"),
                Collectible::new("cat", "A sleepy cat").with_intro(["Meow.", "Purr."]),
                Transform::default(),
            ))
            .id();

        interact(&mut app, cat);
        assert_eq!(sequencer(&mut app).full_text(), Some("Meow."));
        sequencer(&mut app).advance();
        assert_eq!(sequencer(&mut app).full_text(), Some("Purr."));
        sequencer(&mut app).advance();
        app.update();
        assert!(sequencer(&mut app).is_prompt_open());

        sequencer(&mut app).respond(true);
        app.update();
        assert_eq!(
            sequencer(&mut app).full_text(),
            Some(DEFAULT_POST_COLLECTION_LINE)
        );
        {
            let progress = app.world().resource::<ProgressStore>();
            assert_eq!(progress.collected_count(), 1);
            assert!(progress.is_collected("cat"));
        }

        // A repeated request while the farewell plays changes nothing.
        interact(&mut app, cat);
        assert_eq!(app.world().resource::<ProgressStore>().collected_count(), 1);

        sequencer(&mut app).advance();
        app.update();
        assert!(app.world().get::<Deactivated>(cat).is_some());
        assert_eq!(
            app.world().get::<Visibility>(cat),
            Some(&Visibility::Hidden)
        );
    }

    #[test]
    fn declining_leaves_progress_untouched() {
        let mut app = npc_app();
        let dog = app
            .world_mut()
            .spawn((
                in_range("Rex"),
                Collectible::new("dog", "A loyal dog").with_intro(["Woof."]),
                Transform::default(),
            ))
            .id();

        interact(&mut app, dog);
        sequencer(&mut app).advance();
        app.update();
        sequencer(&mut app).respond(false);
        app.update();

        assert_eq!(app.world().resource::<ProgressStore>().collected_count(), 0);
        assert!(!app.world().get::<Interactable>(dog).unwrap().is_interacting());
        assert!(app.world().get::<Deactivated>(dog).is_none());
    }

    #[test]
    fn forced_intro_never_offers_the_prompt() {
        let mut app = npc_app();
        let dog = app
            .world_mut()
            .spawn((
                in_range("Rex"),
                Collectible::new("dog", "").with_intro(["Woof.", "Woof!"]),
                Transform::default(),
            ))
            .id();
        let baker = app
            .world_mut()
            .spawn((
                in_range("Baker"),
                CyclicDialogue::new(["Hi"]),
                Transform::from_xyz(1.0, 0.0, 0.0),
            ))
            .id();

        interact(&mut app, dog);
        interact(&mut app, baker);
        app.update();
        assert!(!sequencer(&mut app).is_prompt_open());
        assert!(!app.world().get::<Interactable>(dog).unwrap().is_interacting());
    }

    fn is_interacting(app: &App, entity: Entity) -> bool {
        app.world()
            .get::<Interactable>(entity)
            .is_some_and(Interactable::is_interacting)
    }

    #[test]
    fn repeated_chatter_keeps_npc_interacting() {
        let mut app = npc_app();
        let baker = app
            .world_mut()
            .spawn((
                in_range("Baker"),
                CyclicDialogue::new(["Hi", "Bye"]),
                Transform::default(),
            ))
            .id();

        interact(&mut app, baker);
        interact(&mut app, baker);
        app.update();
        assert!(is_interacting(&app, baker));
        assert_eq!(sequencer(&mut app).full_text(), Some("Bye"));

        sequencer(&mut app).advance();
        app.update();
        assert!(!is_interacting(&app, baker));
    }

    #[test]
    fn restarting_an_animal_flow_keeps_it_interacting() {
        let mut app = npc_app();
        let cat = app
            .world_mut()
            .spawn((
                in_range("Whiskers"),
                Collectible::new("cat", "").with_intro(["Meow.", "Purr."]),
                Transform::default(),
            ))
            .id();

        interact(&mut app, cat);
        sequencer(&mut app).advance();
        interact(&mut app, cat);
        app.update();
        assert!(is_interacting(&app, cat));
        assert_eq!(sequencer(&mut app).full_text(), Some("Meow."));

        sequencer(&mut app).advance();
        sequencer(&mut app).advance();
        app.update();
        assert!(sequencer(&mut app).is_prompt_open());
        assert!(is_interacting(&app, cat));

        // Asking again while the prompt is up replays the intro, then a fresh prompt.
        interact(&mut app, cat);
        sequencer(&mut app).advance();
        sequencer(&mut app).advance();
        app.update();
        app.update();
        assert!(sequencer(&mut app).is_prompt_open());
        assert!(is_interacting(&app, cat));

        sequencer(&mut app).respond(false);
        app.update();
        assert!(!is_interacting(&app, cat));
        assert_eq!(app.world().resource::<ProgressStore>().collected_count(), 0);
    }

    #[test]
    fn already_collected_animal_starts_deactivated() {
        let mut app = npc_app();
        app.world_mut()
            .resource_mut::<ProgressStore>()
            .collect("cat", "", None);
        let cat = app
            .world_mut()
            .spawn((
                in_range("Whiskers"),
                Collectible::new("cat", "").with_intro(["Meow."]),
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        app.update();
        assert!(app.world().get::<Deactivated>(cat).is_some());
        assert_eq!(
            app.world().get::<Visibility>(cat),
            Some(&Visibility::Hidden)
        );

        interact(&mut app, cat);
        assert!(!sequencer(&mut app).is_active());
    }
}
