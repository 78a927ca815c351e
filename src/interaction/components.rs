//! Components shared by every interactable entity.
use bevy::prelude::*;

/// Default height of the dialogue anchor above an entity's origin.
pub const DEFAULT_ANCHOR_HEIGHT: f32 = 1.5;

/// A world object the player can walk up to and interact with.
///
/// `in_range` only changes on a crossing of `radius`. `is_interacting`
/// drives highlight feedback and never blocks a new interaction.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub name: String,
    pub radius: f32,
    in_range: bool,
    is_interacting: bool,
}

/// Edge produced when the player crosses an interactable's radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeTransition {
    Entered,
    Exited,
}

impl Interactable {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius: radius.max(0.0),
            in_range: false,
            is_interacting: false,
        }
    }

    pub fn in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_interacting(&self) -> bool {
        self.is_interacting
    }

    /// Compares `distance` with the radius and reports an edge, if any.
    pub fn observe_distance(&mut self, distance: f32) -> Option<RangeTransition> {
        let now_in_range = distance <= self.radius;
        if now_in_range == self.in_range {
            return None;
        }
        self.in_range = now_in_range;
        Some(if now_in_range {
            RangeTransition::Entered
        } else {
            RangeTransition::Exited
        })
    }

    pub fn begin_interaction(&mut self) {
        self.is_interacting = true;
    }

    pub fn end_interaction(&mut self) {
        self.is_interacting = false;
    }
}

/// Local offset of the point dialogue and camera framing focus on.
#[derive(Component, Debug, Clone, Copy)]
pub struct DialogueAnchor(pub Vec3);

impl Default for DialogueAnchor {
    fn default() -> Self {
        Self(Vec3::Y * DEFAULT_ANCHOR_HEIGHT)
    }
}

/// World-space anchor for an entity, using the default height when none is set.
pub fn anchor_point(transform: &Transform, anchor: Option<&DialogueAnchor>) -> Vec3 {
    let offset = anchor.copied().unwrap_or_default().0;
    transform.translation + transform.rotation * offset
}

/// Sphere tested by interaction rays.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickCollider {
    pub radius: f32,
    pub center_offset: Vec3,
}

impl PickCollider {
    pub fn new(radius: f32, center_offset: Vec3) -> Self {
        Self {
            radius: radius.max(0.0),
            center_offset,
        }
    }

    pub fn center(&self, transform: &Transform) -> Vec3 {
        transform.translation + self.center_offset
    }
}

/// Entity removed from play for the rest of the session.
#[derive(Component, Debug, Default)]
pub struct Deactivated;

/// Materials swapped in when the player is close enough to interact.
#[derive(Component, Debug, Clone)]
pub struct HighlightMaterials {
    pub normal: Handle<StandardMaterial>,
    pub highlighted: Handle<StandardMaterial>,
}

/// Child marker floating above an NPC while the player is in range.
#[derive(Component, Debug, Default)]
pub struct InteractionIndicator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_edges_fire_once_per_crossing() {
        let mut interactable = Interactable::new("Chief", 2.0);
        assert_eq!(interactable.observe_distance(5.0), None);
        assert_eq!(
            interactable.observe_distance(1.5),
            Some(RangeTransition::Entered)
        );
        assert_eq!(interactable.observe_distance(1.0), None);
        assert_eq!(interactable.observe_distance(2.0), None);
        assert_eq!(
            interactable.observe_distance(2.01),
            Some(RangeTransition::Exited)
        );
        assert_eq!(interactable.observe_distance(9.0), None);
    }

    #[test]
    fn anchor_defaults_above_origin() {
        let transform = Transform::from_xyz(1.0, 0.0, -2.0);
        assert_eq!(anchor_point(&transform, None), Vec3::new(1.0, 1.5, -2.0));
        assert_eq!(
            anchor_point(&transform, Some(&DialogueAnchor(Vec3::Y * 0.5))),
            Vec3::new(1.0, 0.5, -2.0)
        );
    }
}
