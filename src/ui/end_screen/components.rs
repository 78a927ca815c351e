// src/ui/end_screen/components.rs

use bevy::prelude::*;

/// Root of the end screen overlay.
#[derive(Component, Debug)]
pub struct EndScreenRoot;

/// What the player picked on the end screen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndScreenChoice {
    /// Wipe progress and rebuild the level.
    Restart,
    /// Keep wandering the finished town.
    Continue,
}

/// Countdown between the last collection and the end screen appearing.
#[derive(Resource, Debug, Default)]
pub struct PendingEndScreen {
    timer: Option<Timer>,
}

impl PendingEndScreen {
    pub fn start(&mut self, delay_seconds: f32) {
        self.timer = Some(Timer::from_seconds(delay_seconds.max(0.0), TimerMode::Once));
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns `true` once, on the tick the delay runs out.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if timer.tick(delta).is_finished() {
            self.timer = None;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }
}

/// Headline shown on the end screen.
pub fn completion_message(total: usize) -> String {
    format!("Congratulations!\nAll {} animals found a new home.", total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pending_fires_once_after_delay() {
        let mut pending = PendingEndScreen::default();
        assert!(!pending.tick(Duration::from_secs(5)));

        pending.start(2.0);
        assert!(!pending.tick(Duration::from_secs(1)));
        assert!(pending.tick(Duration::from_secs(1)));
        assert!(!pending.is_pending());
        assert!(!pending.tick(Duration::from_secs(1)));
    }
}
