//! Ray picking against interactable pick spheres.
use bevy::{
    math::bounding::{BoundingSphere, RayCast3d},
    prelude::*,
};

/// Ray from the camera through the cursor, if the cursor is inside the window.
pub fn pointer_ray(window: &Window, camera: &Camera, camera_transform: &GlobalTransform) -> Option<Ray3d> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}

/// One pickable sphere in world space.
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
}

/// Returns the entity whose sphere the ray hits first, with the hit distance.
pub fn pick_nearest(
    ray: Ray3d,
    max_distance: f32,
    candidates: impl IntoIterator<Item = PickCandidate>,
) -> Option<(Entity, f32)> {
    let cast = RayCast3d::from_ray(ray, max_distance);
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let sphere = BoundingSphere::new(candidate.center, candidate.radius);
            cast.sphere_intersection_at(&sphere)
                .map(|distance| (candidate.entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn nearest_hit_wins() {
        let ids = entities(2);
        let ray = Ray3d::new(Vec3::ZERO, Dir3::NEG_Z);
        let hit = pick_nearest(
            ray,
            20.0,
            [
                PickCandidate {
                    entity: ids[0],
                    center: Vec3::new(0.0, 0.0, -8.0),
                    radius: 0.5,
                },
                PickCandidate {
                    entity: ids[1],
                    center: Vec3::new(0.0, 0.0, -3.0),
                    radius: 0.5,
                },
            ],
        );
        let (entity, distance) = hit.expect("ray hits both spheres");
        assert_eq!(entity, ids[1]);
        assert!((distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn misses_and_out_of_range_spheres_are_ignored() {
        let ids = entities(2);
        let ray = Ray3d::new(Vec3::ZERO, Dir3::X);
        let hit = pick_nearest(
            ray,
            10.0,
            [
                PickCandidate {
                    entity: ids[0],
                    center: Vec3::new(0.0, 3.0, 0.0),
                    radius: 0.5,
                },
                PickCandidate {
                    entity: ids[1],
                    center: Vec3::new(15.0, 0.0, 0.0),
                    radius: 0.5,
                },
            ],
        );
        assert!(hit.is_none());
    }
}
