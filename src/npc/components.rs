//! NPC behaviours layered on top of [`Interactable`](crate::interaction::components::Interactable).
use bevy::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::player::components::facing_rotation;

pub const DEFAULT_COLLECTION_PROMPT: &str = "Do you want to take this animal in?";
pub const DEFAULT_POST_COLLECTION_LINE: &str = "You took the animal in!";

/// Seconds a full turn-to-face takes at `turn_speed == 1`.
const TURN_DURATION: f32 = 0.5;

/// Chatter NPC that says one line per interaction.
#[derive(Component, Debug, Clone)]
pub struct CyclicDialogue {
    lines: Vec<String>,
    alternative_lines: Vec<String>,
    use_alternative: bool,
    random: bool,
    cycle: bool,
    index: usize,
}

impl CyclicDialogue {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            alternative_lines: Vec::new(),
            use_alternative: false,
            random: false,
            cycle: true,
            index: 0,
        }
    }

    pub fn with_alternative<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternative_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn randomized(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    pub fn cycling(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    fn active_lines(&self) -> &[String] {
        if self.use_alternative && !self.alternative_lines.is_empty() {
            &self.alternative_lines
        } else {
            &self.lines
        }
    }

    /// Picks the line for this interaction, or `None` when the active list is empty.
    pub fn next_line(&mut self, rng: &mut impl Rng) -> Option<String> {
        let len = self.active_lines().len();
        if len == 0 {
            return None;
        }

        if self.random {
            let pick = rng.gen_range(0..len);
            return Some(self.active_lines()[pick].clone());
        }

        // The index may outlive a switch to a shorter list.
        let current = self.index % len;
        let line = self.active_lines()[current].clone();
        if self.cycle {
            self.index = (current + 1) % len;
        }
        Some(line)
    }

    pub fn set_alternative_mode(&mut self, use_alternative: bool) {
        self.use_alternative = use_alternative;
    }

    pub fn uses_alternative(&self) -> bool {
        self.use_alternative
    }

    /// Replaces the regular lines and restarts from the first one.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self.index = 0;
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn reset_index(&mut self) {
        self.index = 0;
    }
}

/// An animal the player can take in.
#[derive(Component, Debug, Clone)]
pub struct Collectible {
    pub kind: String,
    pub description: String,
    pub icon: Option<Handle<Image>>,
    pub intro_lines: Vec<String>,
    pub collection_prompt: String,
    pub post_collection_line: String,
    collected: bool,
}

impl Collectible {
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            icon: None,
            intro_lines: Vec::new(),
            collection_prompt: DEFAULT_COLLECTION_PROMPT.to_string(),
            post_collection_line: DEFAULT_POST_COLLECTION_LINE.to_string(),
            collected: false,
        }
    }

    pub fn with_intro<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intro_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.collection_prompt = prompt.into();
        self
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn mark_collected(&mut self) {
        self.collected = true;
    }
}

/// The NPC that greets the player and whose lines change after the finale.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MarksVolunteerChief;

/// Makes an NPC turn toward the player when spoken to.
#[derive(Component, Debug, Clone, Copy)]
pub struct TurnsToFace {
    pub turn_speed: f32,
}

impl Default for TurnsToFace {
    fn default() -> Self {
        Self { turn_speed: 5.0 }
    }
}

/// In-flight yaw turn, removed once it completes.
#[derive(Component, Debug, Clone, Copy)]
pub struct FacingTurn {
    from: Quat,
    to: Quat,
    elapsed: f32,
    turn_speed: f32,
}

impl FacingTurn {
    /// Turn from `current` toward `target`, ignoring height. `None` when
    /// the two positions share the same ground point.
    pub fn toward(current: &Transform, target: Vec3, turn_speed: f32) -> Option<Self> {
        let to = facing_rotation(target - current.translation)?;
        Some(Self {
            from: current.rotation,
            to,
            elapsed: 0.0,
            turn_speed: turn_speed.max(0.0),
        })
    }

    /// Advances the turn and returns the rotation to apply plus whether it finished.
    pub fn tick(&mut self, delta_seconds: f32) -> (Quat, bool) {
        if self.elapsed >= TURN_DURATION {
            return (self.to, true);
        }
        let rotation = self.from.slerp(self.to, self.elapsed / TURN_DURATION);
        self.elapsed += delta_seconds.max(0.0) * self.turn_speed;
        (rotation, false)
    }

    pub fn target(&self) -> Quat {
        self.to
    }
}

/// Source of randomness for line selection; seedable for tests.
#[derive(Resource, Debug)]
pub struct DialogueRng(pub SmallRng);

impl DialogueRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for DialogueRng {
    fn default() -> Self {
        Self(SmallRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_back_to_first_line() {
        let mut rng = DialogueRng::seeded(7);
        let mut chatter = CyclicDialogue::new(["Hi", "Bye"]);
        let seen: Vec<_> = (0..3).filter_map(|_| chatter.next_line(&mut rng.0)).collect();
        assert_eq!(seen, ["Hi", "Bye", "Hi"]);
    }

    #[test]
    fn without_cycling_the_first_line_repeats() {
        let mut rng = DialogueRng::seeded(7);
        let mut chatter = CyclicDialogue::new(["a", "b", "c"]).cycling(false);
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("a"));
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("a"));
    }

    #[test]
    fn random_selection_stays_within_list() {
        let mut rng = DialogueRng::seeded(42);
        let mut chatter = CyclicDialogue::new(["x", "y", "z"]).randomized(true);
        for _ in 0..20 {
            let line = chatter.next_line(&mut rng.0).unwrap();
            assert!(["x", "y", "z"].contains(&line.as_str()));
        }
    }

    #[test]
    fn empty_list_shows_nothing() {
        let mut rng = DialogueRng::seeded(1);
        let mut chatter = CyclicDialogue::new(Vec::<String>::new());
        assert_eq!(chatter.next_line(&mut rng.0), None);
    }

    #[test]
    fn alternative_mode_switches_lists_and_survives_shorter_list() {
        let mut rng = DialogueRng::seeded(1);
        let mut chatter = CyclicDialogue::new(["one", "two", "three"]).with_alternative(["done"]);
        chatter.next_line(&mut rng.0);
        chatter.next_line(&mut rng.0);

        chatter.set_alternative_mode(true);
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("done"));
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("done"));

        chatter.set_alternative_mode(false);
        chatter.set_lines(["fresh", "start"]);
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("fresh"));
        chatter.add_line("extra");
        chatter.reset_index();
        assert_eq!(chatter.next_line(&mut rng.0).as_deref(), Some("fresh"));
    }

    #[test]
    fn facing_turn_snaps_to_target_at_the_end() {
        let start = Transform::default();
        let mut turn = FacingTurn::toward(&start, Vec3::new(3.0, 5.0, 0.0), 5.0).unwrap();

        let (first, done) = turn.tick(0.02);
        assert!(!done);
        assert!(first.angle_between(Quat::IDENTITY) < 1e-4);

        let mut finished = false;
        for _ in 0..20 {
            let (rotation, done) = turn.tick(0.02);
            if done {
                assert!(rotation.angle_between(turn.target()) < 1e-4);
                finished = true;
                break;
            }
        }
        assert!(finished);
    }

    #[test]
    fn facing_turn_needs_a_ground_direction() {
        let start = Transform::from_xyz(1.0, 0.0, 1.0);
        assert!(FacingTurn::toward(&start, Vec3::new(1.0, 4.0, 1.0), 5.0).is_none());
    }
}
