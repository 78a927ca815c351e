//! Builds the volunteer chief and the animals waiting around town.
use bevy::{
    math::primitives::{Capsule3d, Sphere},
    prelude::*,
};

use crate::{
    core::{config::InteractionSettings, state::LevelEntity},
    interaction::components::{
        DialogueAnchor, HighlightMaterials, Interactable, InteractionIndicator, PickCollider,
    },
};

use super::components::{Collectible, CyclicDialogue, MarksVolunteerChief, TurnsToFace};

pub const CHIEF_POSITION: Vec3 = Vec3::new(0.0, 0.8, -4.0);
pub const CHIEF_PICK_RADIUS: f32 = 0.6;
pub const ANIMAL_RADIUS: f32 = 0.4;
pub const ANIMAL_PICK_RADIUS: f32 = ANIMAL_RADIUS + 0.2;

struct AnimalPrototype {
    kind: &'static str,
    name: &'static str,
    description: &'static str,
    color: Color,
    position: Vec3,
    intro: [&'static str; 2],
}

fn animal_prototypes() -> [AnimalPrototype; 9] {
    [
        AnimalPrototype {
            kind: "cat",
            name: "Whiskers",
            description: "A sleepy tabby who loves sunny windowsills.",
            color: Color::srgb_u8(230, 150, 60),
            position: Vec3::new(6.0, 0.0, -2.0),
            intro: ["Mrrow... is that a warm lap I see?", "I've been napping alone in this alley for days."],
        },
        AnimalPrototype {
            kind: "dog",
            name: "Biscuit",
            description: "A loyal mutt with endless energy.",
            color: Color::srgb_u8(150, 100, 60),
            position: Vec3::new(-7.0, 0.0, -3.0),
            intro: ["Woof! Woof! Are you here to play?", "Nobody has thrown me a stick in ages."],
        },
        AnimalPrototype {
            kind: "rabbit",
            name: "Clover",
            description: "A shy bunny with a twitchy nose.",
            color: Color::srgb_u8(235, 235, 235),
            position: Vec3::new(10.0, 0.0, 6.0),
            intro: ["*sniff sniff*", "You smell like carrots. I think I trust you."],
        },
        AnimalPrototype {
            kind: "parrot",
            name: "Captain",
            description: "A chatty parrot who repeats everything.",
            color: Color::srgb_u8(40, 190, 80),
            position: Vec3::new(-11.0, 0.0, 7.0),
            intro: ["Squawk! Hello! Hello!", "Pretty bird needs a home! Squawk!"],
        },
        AnimalPrototype {
            kind: "turtle",
            name: "Shelly",
            description: "A patient turtle in no hurry at all.",
            color: Color::srgb_u8(90, 130, 70),
            position: Vec3::new(3.0, 0.0, 12.0),
            intro: ["Oh... hello... there...", "I have been... walking to the shelter... since spring."],
        },
        AnimalPrototype {
            kind: "hamster",
            name: "Peanut",
            description: "A tiny hamster with big cheeks.",
            color: Color::srgb_u8(220, 180, 120),
            position: Vec3::new(-4.0, 0.0, 14.0),
            intro: ["Eek! You scared me!", "Do you have any sunflower seeds?"],
        },
        AnimalPrototype {
            kind: "duck",
            name: "Puddles",
            description: "A cheerful duck who loves rainy days.",
            color: Color::srgb_u8(245, 215, 60),
            position: Vec3::new(14.0, 0.0, -9.0),
            intro: ["Quack! The pond dried up.", "I could really use a place with a bathtub."],
        },
        AnimalPrototype {
            kind: "goat",
            name: "Pepper",
            description: "A stubborn goat who eats everything.",
            color: Color::srgb_u8(180, 170, 160),
            position: Vec3::new(-14.0, 0.0, -10.0),
            intro: ["Meeeh. I ate the fence.", "Now I can't go back. Meeeh."],
        },
        AnimalPrototype {
            kind: "pony",
            name: "Daisy",
            description: "A gentle pony with a braided mane.",
            color: Color::srgb_u8(170, 110, 90),
            position: Vec3::new(0.0, 0.0, -15.0),
            intro: ["Neigh! Hello, friend.", "The old farm closed and I've been wandering ever since."],
        },
    ]
}

/// Spawns the chief and every animal with its interaction components.
pub fn spawn_town_npcs(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<InteractionSettings>,
) {
    let indicator_mesh = meshes.add(Mesh::from(Sphere::new(0.12)));
    let indicator_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 220, 40),
        emissive: LinearRgba::rgb(2.0, 1.6, 0.2),
        ..default()
    });

    let chief_materials = highlight_pair(&mut materials, Color::srgb_u8(70, 110, 200));
    commands
        .spawn((
            Mesh3d(meshes.add(Mesh::from(Capsule3d::new(0.3, 1.0)))),
            MeshMaterial3d(chief_materials.normal.clone()),
            chief_materials,
            Transform::from_translation(CHIEF_POSITION),
            Visibility::default(),
            Interactable::new("Volunteer Chief", settings.default_radius),
            PickCollider::new(CHIEF_PICK_RADIUS, Vec3::ZERO),
            DialogueAnchor(Vec3::Y * 0.9),
            CyclicDialogue::new([
                "Welcome to Pet Town! Nine animals are lost somewhere around here.",
                "Talk to each animal and ask if they want to come to the shelter.",
                "Press E or click on someone nearby to talk to them.",
            ])
            .with_alternative([
                "You found every single one of them. The shelter is full of happy tails!",
                "Thank you, volunteer. Pet Town is lucky to have you.",
            ]),
            MarksVolunteerChief,
            TurnsToFace::default(),
            LevelEntity,
            Name::new("Volunteer Chief"),
        ))
        .with_children(|parent| {
            spawn_indicator(parent, &indicator_mesh, &indicator_material, 1.3);
        });

    let animal_mesh = meshes.add(Mesh::from(Sphere::new(ANIMAL_RADIUS)));
    for prototype in animal_prototypes() {
        let pair = highlight_pair(&mut materials, prototype.color);
        commands
            .spawn((
                Mesh3d(animal_mesh.clone()),
                MeshMaterial3d(pair.normal.clone()),
                pair,
                Transform::from_translation(prototype.position + Vec3::Y * ANIMAL_RADIUS),
                Visibility::default(),
                Interactable::new(prototype.name, settings.default_radius),
                PickCollider::new(ANIMAL_PICK_RADIUS, Vec3::ZERO),
                DialogueAnchor(Vec3::Y * 0.6),
                Collectible::new(prototype.kind, prototype.description)
                    .with_intro(prototype.intro)
                    .with_prompt(format!("Will you take {} to the shelter?", prototype.name)),
                LevelEntity,
                Name::new(format!("{} ({})", prototype.name, prototype.kind)),
            ))
            .with_children(|parent| {
                spawn_indicator(parent, &indicator_mesh, &indicator_material, 0.8);
            });
    }

    info!("Spawned the volunteer chief and {} animals", animal_prototypes().len());
}

fn highlight_pair(materials: &mut Assets<StandardMaterial>, color: Color) -> HighlightMaterials {
    HighlightMaterials {
        normal: materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.8,
            ..default()
        }),
        highlighted: materials.add(StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 0.6,
            ..default()
        }),
    }
}

fn spawn_indicator(
    parent: &mut ChildSpawnerCommands,
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
    height: f32,
) {
    parent.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::from_xyz(0.0, height, 0.0),
        Visibility::Hidden,
        InteractionIndicator,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn animal_kinds_are_unique() {
        let kinds: HashSet<_> = animal_prototypes().iter().map(|p| p.kind).collect();
        assert_eq!(kinds.len(), 9);
    }
}
