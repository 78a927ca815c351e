//! Systems for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::{
    camera::components::{CameraRig, FollowRig},
    core::{config::FollowCameraSettings, state::LevelEntity},
    world::components::PrimarySun,
};

const GROUND_SCALE: f32 = 40.0;
const CAMERA_START_POS: Vec3 = Vec3::new(0.0, 5.0, 9.0);

/// Spawns the main camera once. It survives restarts so menus keep rendering.
pub fn spawn_main_camera(mut commands: Commands, follow: Res<FollowCameraSettings>) {
    let camera_transform =
        Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::Y, Vec3::Y);

    commands.spawn((
        Camera3d::default(),
        camera_transform,
        CameraRig::new(&camera_transform),
        FollowRig::new(&follow),
        Name::new("Main Camera"),
    ));
}

/// Spawns the ground plane and sun for a fresh level.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(110, 170, 100),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        LevelEntity,
        Name::new("Ground"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(12.0, 24.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
        LevelEntity,
        Name::new("Sun"),
    ));
}

/// Removes every level entity so the next `Playing` entry rebuilds the town.
pub fn despawn_level(commands: &mut Commands, level: &Query<Entity, With<LevelEntity>>) {
    let mut cleared = 0;
    for entity in level.iter() {
        commands.entity(entity).despawn();
        cleared += 1;
    }
    info!("Level cleared ({} entities)", cleared);
}
