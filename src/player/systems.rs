//! Systems spawning the player and driving its locomotion.
use bevy::{
    math::primitives::{Capsule3d, InfinitePlane3d},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    camera::components::CameraRig,
    core::{config::PlayerSettings, state::LevelEntity},
    interaction::picking::pointer_ray,
};

use super::components::{Player, PlayerMotion};

const PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 2.0);
const MAX_CLICK_DISTANCE: f32 = 100.0;

/// Spawns the player root with its capsule body as a child.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands
        .spawn((
            Transform::from_translation(PLAYER_START),
            Visibility::default(),
            Player,
            PlayerMotion::default(),
            LevelEntity,
            Name::new("Player"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Mesh::from(Capsule3d::new(0.3, 1.0)))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb_u8(235, 120, 140),
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.8, 0.0),
            ));
        });
}

/// Camera-relative WASD/arrow steering, projected onto the ground.
pub fn keyboard_steering(keyboard: &ButtonInput<KeyCode>, camera: &Transform) -> Vec3 {
    let mut vertical = 0.0;
    let mut horizontal = 0.0;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        vertical += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        vertical -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        horizontal += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        horizontal -= 1.0;
    }
    if vertical == 0.0 && horizontal == 0.0 {
        return Vec3::ZERO;
    }

    let forward = {
        let f = camera.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = camera.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };
    (forward * vertical + right * horizontal).normalize_or_zero()
}

/// Reads keyboard and click input into the player's motion plan.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn steer_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<PlayerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform, &Transform), With<CameraRig>>,
    ui_buttons: Query<&Interaction, With<Button>>,
    mut player: Query<(&Transform, &mut PlayerMotion), With<Player>>,
) {
    let Ok((player_transform, mut motion)) = player.single_mut() else {
        return;
    };
    let camera = cameras.single().ok();

    let steering = camera
        .map(|(_, _, transform)| keyboard_steering(&keyboard, transform))
        .unwrap_or(Vec3::ZERO);

    let over_ui = ui_buttons
        .iter()
        .any(|interaction| *interaction != Interaction::None);
    let clicked = if settings.click_to_move && !over_ui && mouse.just_pressed(MouseButton::Left) {
        match (windows.single(), camera) {
            (Ok(window), Some((camera, camera_transform, _))) => {
                pointer_ray(window, camera, camera_transform).and_then(ground_point)
            }
            _ => None,
        }
    } else {
        None
    };

    motion.plan(
        steering,
        clicked,
        player_transform.translation,
        settings.stopping_distance,
    );
}

fn ground_point(ray: Ray3d) -> Option<Vec3> {
    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
    (distance <= MAX_CLICK_DISTANCE).then(|| ray.get_point(distance))
}

/// Integrates the motion plan into the player's transform.
pub fn move_player(
    time: Res<Time>,
    settings: Res<PlayerSettings>,
    mut player: Query<(&mut Transform, &mut PlayerMotion), With<Player>>,
) {
    let delta = time.delta_secs();
    for (mut transform, mut motion) in player.iter_mut() {
        motion.step(&mut transform, &settings, delta);
    }
}
